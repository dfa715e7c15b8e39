//! UI 테마 정의.
//!
//! 다크/라이트 팔레트와 메트릭별 강조색.

use iced::Color;

use aerohud_core::settings::Theme;

/// 메트릭별 강조색 (다크/라이트 공통)
pub const ACCENT_CPU: Color = Color {
    r: 0.20,
    g: 0.59,
    b: 0.86,
    a: 1.0,
}; // #3498DB
pub const ACCENT_RAM: Color = Color {
    r: 0.61,
    g: 0.35,
    b: 0.71,
    a: 1.0,
}; // #9B59B6
pub const ACCENT_GPU: Color = Color {
    r: 0.91,
    g: 0.30,
    b: 0.24,
    a: 1.0,
}; // #E74C3C
pub const ACCENT_NET: Color = Color {
    r: 0.18,
    g: 0.80,
    b: 0.44,
    a: 1.0,
}; // #2ECC71
pub const ACCENT_TEMP: Color = Color {
    r: 0.90,
    g: 0.49,
    b: 0.13,
    a: 1.0,
}; // #E67E22
pub const ACCENT_DISK: Color = Color {
    r: 0.95,
    g: 0.61,
    b: 0.07,
    a: 1.0,
}; // #F39C12

/// 테마 색상 팔레트
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// 메인 창 배경 (반투명)
    pub background: Color,
    /// 메트릭 카드 배경
    pub card: Color,
    /// 카드 테두리
    pub card_border: Color,
    /// 주요 텍스트 색
    pub text_primary: Color,
    /// 보조 텍스트 색
    pub text_secondary: Color,
    /// 진행 바 트랙 색
    pub progress_track: Color,
    /// 버튼 배경
    pub button: Color,
    /// 플로팅 위젯 배경 (반투명)
    pub widget_background: Color,
    /// 위젯 테두리
    pub widget_border: Color,
}

impl ThemeColors {
    /// 다크 팔레트
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgba(0.10, 0.10, 0.14, 0.90),
            card: Color::from_rgba(1.0, 1.0, 1.0, 0.06),
            card_border: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            text_primary: Color::from_rgb(1.0, 1.0, 1.0),
            text_secondary: Color::from_rgba(1.0, 1.0, 1.0, 0.63),
            progress_track: Color::from_rgba(1.0, 1.0, 1.0, 0.10),
            button: Color::from_rgba(1.0, 1.0, 1.0, 0.12),
            widget_background: Color::from_rgba(0.12, 0.12, 0.16, 0.78),
            widget_border: Color::from_rgba(1.0, 1.0, 1.0, 0.16),
        }
    }

    /// 라이트 팔레트
    pub fn light() -> Self {
        Self {
            background: Color::from_rgba(0.96, 0.96, 0.98, 0.90),
            card: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            card_border: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            text_primary: Color::from_rgb(0.12, 0.12, 0.14),
            text_secondary: Color::from_rgba(0.0, 0.0, 0.0, 0.55),
            progress_track: Color::from_rgba(0.0, 0.0, 0.0, 0.10),
            button: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            widget_background: Color::from_rgba(0.95, 0.95, 0.98, 0.85),
            widget_border: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
        }
    }

    /// 설정 테마에 따른 팔레트 반환
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme() {
        let colors = ThemeColors::dark();
        assert!(colors.background.r < 0.5); // 어두운 배경
    }

    #[test]
    fn light_theme() {
        let colors = ThemeColors::light();
        assert!(colors.background.r > 0.5); // 밝은 배경
    }

    #[test]
    fn for_theme() {
        let dark = ThemeColors::for_theme(Theme::Dark);
        let light = ThemeColors::for_theme(Theme::Light);
        assert!(dark.background.r < light.background.r);
    }
}
