//! 사용자 설정 레코드와 열거형.
//!
//! JSON 파일의 키/값 문자열 표현은 기존 설치본과의 호환을 위해 고정이다.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// UI 색상 테마.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// 반대 테마를 돌려준다. 두 번 적용하면 원래대로 돌아온다.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// 오버레이 창 레벨 모드.
///
/// `AllScreens`는 모든 창 위에 고정, `DesktopOnly`는 일반 창 레벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    #[default]
    DesktopOnly,
    AllScreens,
}

impl OverlayMode {
    pub fn toggled(self) -> Self {
        match self {
            OverlayMode::DesktopOnly => OverlayMode::AllScreens,
            OverlayMode::AllScreens => OverlayMode::DesktopOnly,
        }
    }
}

/// 수집 주기 프로파일.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceMode {
    #[default]
    Balanced,
    LowPower,
    HighPerformance,
}

impl PerformanceMode {
    /// 모드별 메트릭 수집 주기.
    pub fn tick_interval(self) -> Duration {
        match self {
            PerformanceMode::Balanced => Duration::from_millis(1000),
            PerformanceMode::LowPower => Duration::from_millis(3000),
            PerformanceMode::HighPerformance => Duration::from_millis(500),
        }
    }

    /// 트레이 메뉴 표시용 레이블.
    pub fn label(self) -> &'static str {
        match self {
            PerformanceMode::Balanced => "Balanced",
            PerformanceMode::LowPower => "Low Power",
            PerformanceMode::HighPerformance => "High Performance",
        }
    }
}

/// 위젯 투명도 하한. 이 밑으로는 사실상 보이지 않는다.
pub const MIN_WIDGET_OPACITY: f64 = 0.1;
/// 위젯 투명도 상한.
pub const MAX_WIDGET_OPACITY: f64 = 1.0;

fn default_main_window_position() -> [i32; 2] {
    [100, 100]
}

fn default_widget_position() -> [i32; 2] {
    [1200, 100]
}

fn default_widget_opacity() -> f64 {
    0.9
}

/// 디스크에 저장되는 전체 설정 레코드.
///
/// 필드별 `serde(default)` 덕분에 일부 키가 빠진 파일도 그대로 읽힌다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub widget_visible: bool,
    #[serde(default)]
    pub startup_enabled: bool,
    #[serde(default = "default_main_window_position")]
    pub main_window_position: [i32; 2],
    #[serde(default = "default_widget_position")]
    pub widget_position: [i32; 2],
    #[serde(default)]
    pub overlay_mode: OverlayMode,
    #[serde(default)]
    pub performance_mode: PerformanceMode,
    #[serde(default)]
    pub widget_auto_hide: bool,
    #[serde(default)]
    pub widget_click_through: bool,
    #[serde(default = "default_widget_opacity")]
    pub widget_opacity: f64,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            widget_visible: false,
            startup_enabled: false,
            main_window_position: default_main_window_position(),
            widget_position: default_widget_position(),
            overlay_mode: OverlayMode::default(),
            performance_mode: PerformanceMode::default(),
            widget_auto_hide: false,
            widget_click_through: false,
            widget_opacity: default_widget_opacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_involution() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_overlay_mode_two_cycle() {
        let mode = OverlayMode::DesktopOnly;
        assert_eq!(mode.toggled(), OverlayMode::AllScreens);
        assert_eq!(mode.toggled().toggled(), OverlayMode::DesktopOnly);
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(
            PerformanceMode::Balanced.tick_interval(),
            Duration::from_millis(1000)
        );
        assert_eq!(
            PerformanceMode::LowPower.tick_interval(),
            Duration::from_millis(3000)
        );
        assert_eq!(
            PerformanceMode::HighPerformance.tick_interval(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_default_settings() {
        let settings = HudSettings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.widget_visible);
        assert!(!settings.startup_enabled);
        assert_eq!(settings.main_window_position, [100, 100]);
        assert_eq!(settings.widget_position, [1200, 100]);
        assert_eq!(settings.overlay_mode, OverlayMode::DesktopOnly);
        assert_eq!(settings.performance_mode, PerformanceMode::Balanced);
        assert!(!settings.widget_auto_hide);
        assert!(!settings.widget_click_through);
        assert_eq!(settings.widget_opacity, 0.9);
    }

    #[test]
    fn test_enum_string_representation() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::to_string(&OverlayMode::DesktopOnly).unwrap(),
            "\"desktop_only\""
        );
        assert_eq!(
            serde_json::to_string(&PerformanceMode::HighPerformance).unwrap(),
            "\"high_performance\""
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: HudSettings =
            serde_json::from_str(r#"{"theme": "light", "widget_opacity": 0.5}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.widget_opacity, 0.5);
        assert_eq!(settings.performance_mode, PerformanceMode::Balanced);
        assert_eq!(settings.widget_position, [1200, 100]);
    }
}
