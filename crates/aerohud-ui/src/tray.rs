//! 시스템 트레이.
//!
//! tray-icon 기반 트레이 아이콘 + 중첩 메뉴.
//! macOS: 메인 스레드에서 초기화 필수 (muda 제약).
//! 이벤트 폴링은 별도 스레드에서 수행, mpsc 채널로 GUI에 전달.
//! 체크 상태는 자동으로 바뀌지 않으므로 설정 변경 후 `sync()`로 맞춘다.

use std::sync::mpsc;

use tracing::info;

use aerohud_core::settings::{HudSettings, OverlayMode, PerformanceMode};

/// 트레이 이벤트 (트레이 → GUI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrayEvent {
    /// 메인 창 표시
    ShowMainWindow,
    /// 플로팅 위젯 표시/숨기기
    ToggleWidget,
    /// 오버레이 모드 전환
    ToggleOverlayMode,
    /// 로그인 시 자동 실행 토글
    ToggleStartup,
    /// 다크/라이트 테마 전환
    ToggleTheme,
    /// 수집 주기 프로파일 변경
    SetPerformanceMode(PerformanceMode),
    /// 위젯 자동 숨김 토글
    ToggleAutoHide,
    /// 위젯 클릭 통과 토글
    ToggleClickThrough,
    /// 위젯 투명도 설정
    SetWidgetOpacity(f64),
    /// 앱 종료
    Quit,
}

/// 투명도 서브메뉴 단계
pub const OPACITY_STEPS: [f64; 5] = [0.3, 0.5, 0.7, 0.9, 1.0];

#[cfg(not(target_os = "linux"))]
const TRAY_ICON_SIZE: u32 = 32;

fn overlay_label(mode: OverlayMode) -> &'static str {
    match mode {
        OverlayMode::DesktopOnly => "Overlay: Desktop Only",
        OverlayMode::AllScreens => "Overlay: All Screens",
    }
}

/// 트레이 매니저
///
/// macOS에서는 메인 스레드에서 `new()` 호출 필수.
/// 이벤트 폴링은 내부적으로 별도 스레드에서 수행.
#[cfg(not(target_os = "linux"))]
pub struct TrayManager {
    /// 트레이 아이콘 (드롭 방지)
    #[allow(dead_code)]
    _tray_icon: tray_icon::TrayIcon,
    overlay_item: tray_icon::menu::MenuItem,
    startup_item: tray_icon::menu::CheckMenuItem,
    auto_hide_item: tray_icon::menu::CheckMenuItem,
    click_through_item: tray_icon::menu::CheckMenuItem,
    performance_items: Vec<(PerformanceMode, tray_icon::menu::CheckMenuItem)>,
    opacity_items: Vec<(f64, tray_icon::menu::CheckMenuItem)>,
}

#[cfg(not(target_os = "linux"))]
impl TrayManager {
    /// 트레이 매니저 생성 (메인 스레드에서 호출 필수)
    ///
    /// # Returns
    /// - `TrayManager` 인스턴스
    /// - 이벤트 수신 채널 (`mpsc::Receiver<TrayEvent>`)
    pub fn new(settings: &HudSettings) -> Result<(Self, mpsc::Receiver<TrayEvent>), String> {
        use tray_icon::{
            menu::{CheckMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem, Submenu},
            TrayIconBuilder,
        };

        info!("시스템 트레이 초기화 (메인 스레드)");

        // 메뉴 생성 (메인 스레드 필수)
        let menu = Menu::new();
        let mut bindings: Vec<(MenuId, TrayEvent)> = Vec::new();

        // View 서브메뉴
        let view_menu = Submenu::new("View", true);
        let show_item = MenuItem::new("Show Main Window", true, None);
        let widget_item = MenuItem::new("Toggle Floating Widget", true, None);
        let overlay_item = MenuItem::new(overlay_label(settings.overlay_mode), true, None);
        view_menu.append(&show_item).map_err(|e| e.to_string())?;
        view_menu.append(&widget_item).map_err(|e| e.to_string())?;
        view_menu.append(&overlay_item).map_err(|e| e.to_string())?;
        bindings.push((show_item.id().clone(), TrayEvent::ShowMainWindow));
        bindings.push((widget_item.id().clone(), TrayEvent::ToggleWidget));
        bindings.push((overlay_item.id().clone(), TrayEvent::ToggleOverlayMode));

        // Settings 서브메뉴
        let settings_menu = Submenu::new("Settings", true);
        let startup_item =
            CheckMenuItem::new("Start with System", true, settings.startup_enabled, None);
        let theme_item = MenuItem::new("Toggle Theme", true, None);
        settings_menu.append(&startup_item).map_err(|e| e.to_string())?;
        settings_menu.append(&theme_item).map_err(|e| e.to_string())?;
        bindings.push((startup_item.id().clone(), TrayEvent::ToggleStartup));
        bindings.push((theme_item.id().clone(), TrayEvent::ToggleTheme));

        // Performance Mode 서브메뉴 (택일 체크)
        let performance_menu = Submenu::new("Performance Mode", true);
        let mut performance_items = Vec::new();
        for mode in [
            PerformanceMode::Balanced,
            PerformanceMode::LowPower,
            PerformanceMode::HighPerformance,
        ] {
            let item =
                CheckMenuItem::new(mode.label(), true, settings.performance_mode == mode, None);
            performance_menu.append(&item).map_err(|e| e.to_string())?;
            bindings.push((item.id().clone(), TrayEvent::SetPerformanceMode(mode)));
            performance_items.push((mode, item));
        }
        settings_menu
            .append(&performance_menu)
            .map_err(|e| e.to_string())?;

        // Widget Settings 서브메뉴
        let widget_menu = Submenu::new("Widget Settings", true);
        let auto_hide_item =
            CheckMenuItem::new("Auto-Hide Widget", true, settings.widget_auto_hide, None);
        let click_through_item = CheckMenuItem::new(
            "Click-Through Mode",
            true,
            settings.widget_click_through,
            None,
        );
        widget_menu.append(&auto_hide_item).map_err(|e| e.to_string())?;
        widget_menu
            .append(&click_through_item)
            .map_err(|e| e.to_string())?;
        bindings.push((auto_hide_item.id().clone(), TrayEvent::ToggleAutoHide));
        bindings.push((click_through_item.id().clone(), TrayEvent::ToggleClickThrough));

        let opacity_menu = Submenu::new("Widget Opacity", true);
        let mut opacity_items = Vec::new();
        for step in OPACITY_STEPS {
            let label = format!("{}%", (step * 100.0) as u32);
            let checked = (settings.widget_opacity - step).abs() < f64::EPSILON;
            let item = CheckMenuItem::new(label, true, checked, None);
            opacity_menu.append(&item).map_err(|e| e.to_string())?;
            bindings.push((item.id().clone(), TrayEvent::SetWidgetOpacity(step)));
            opacity_items.push((step, item));
        }
        widget_menu.append(&opacity_menu).map_err(|e| e.to_string())?;
        settings_menu.append(&widget_menu).map_err(|e| e.to_string())?;

        let quit_item = MenuItem::new("Quit", true, None);
        bindings.push((quit_item.id().clone(), TrayEvent::Quit));

        menu.append(&view_menu).map_err(|e| e.to_string())?;
        menu.append(&settings_menu).map_err(|e| e.to_string())?;
        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| e.to_string())?;
        menu.append(&quit_item).map_err(|e| e.to_string())?;

        // 트레이 아이콘 생성 (메인 스레드 필수)
        let icon = build_icon()?;
        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip("AeroHUD")
            .with_icon(icon)
            .with_menu_on_left_click(true) // macOS: 좌클릭으로 메뉴 표시
            .build()
            .map_err(|e| e.to_string())?;

        info!("시스템 트레이 아이콘 생성 완료");

        // 이벤트 폴링 스레드 시작 (MenuEvent::receiver는 스레드 안전)
        let (event_tx, event_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let menu_event_rx = MenuEvent::receiver();

            loop {
                // 메뉴 이벤트 대기 (블로킹)
                if let Ok(event) = menu_event_rx.recv() {
                    let tray_event = bindings
                        .iter()
                        .find(|(id, _)| *id == event.id)
                        .map(|(_, e)| *e);
                    if let Some(e) = tray_event {
                        if event_tx.send(e).is_err() {
                            // 수신자가 드롭됨 → 루프 종료
                            info!("트레이 이벤트 채널 닫힘, 루프 종료");
                            break;
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                _tray_icon: tray_icon,
                overlay_item,
                startup_item,
                auto_hide_item,
                click_through_item,
                performance_items,
                opacity_items,
            },
            event_rx,
        ))
    }

    /// 현재 설정을 메뉴 체크 상태와 레이블에 반영한다.
    pub fn sync(&self, settings: &HudSettings) {
        self.overlay_item
            .set_text(overlay_label(settings.overlay_mode));
        self.startup_item.set_checked(settings.startup_enabled);
        self.auto_hide_item.set_checked(settings.widget_auto_hide);
        self.click_through_item
            .set_checked(settings.widget_click_through);
        for (mode, item) in &self.performance_items {
            item.set_checked(settings.performance_mode == *mode);
        }
        for (step, item) in &self.opacity_items {
            item.set_checked((settings.widget_opacity - step).abs() < f64::EPSILON);
        }
    }
}

/// 32x32 RGBA 트레이 아이콘을 코드로 생성한다 (이중 링).
#[cfg(not(target_os = "linux"))]
fn build_icon() -> Result<tray_icon::Icon, String> {
    let size = TRAY_ICON_SIZE;
    let center = (size as f32 - 1.0) / 2.0;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            let (pixel, alpha) = if dist < 6.0 {
                ([52u8, 152, 219], 255u8)
            } else if dist < 10.0 {
                ([52, 152, 219], 0)
            } else if dist < 14.0 {
                ([46, 204, 113], 255)
            } else {
                ([0, 0, 0], 0)
            };
            rgba.extend_from_slice(&[pixel[0], pixel[1], pixel[2], alpha]);
        }
    }
    tray_icon::Icon::from_rgba(rgba, size, size).map_err(|e| format!("아이콘 생성 실패: {e}"))
}

// ── Linux: 스텁 구현 (appindicator 미지원) ──

#[cfg(target_os = "linux")]
pub struct TrayManager;

#[cfg(target_os = "linux")]
impl TrayManager {
    pub fn new(_settings: &HudSettings) -> Result<(Self, mpsc::Receiver<TrayEvent>), String> {
        let (_tx, rx) = mpsc::channel();
        info!("Linux: 시스템 트레이 미지원 (appindicator 필요)");
        Ok((Self, rx))
    }

    pub fn sync(&self, _settings: &HudSettings) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_event_equality() {
        assert_eq!(TrayEvent::Quit, TrayEvent::Quit);
        assert_ne!(TrayEvent::Quit, TrayEvent::ShowMainWindow);
        assert_eq!(
            TrayEvent::SetPerformanceMode(PerformanceMode::LowPower),
            TrayEvent::SetPerformanceMode(PerformanceMode::LowPower)
        );
    }

    #[test]
    fn overlay_labels() {
        assert_eq!(
            overlay_label(OverlayMode::DesktopOnly),
            "Overlay: Desktop Only"
        );
        assert_eq!(
            overlay_label(OverlayMode::AllScreens),
            "Overlay: All Screens"
        );
    }

    #[test]
    fn opacity_steps_within_clamp_range() {
        for step in OPACITY_STEPS {
            assert!((0.1..=1.0).contains(&step));
        }
    }
}
