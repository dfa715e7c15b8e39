//! # aerohud-ui
//!
//! iced 기반 AeroHUD UI 크레이트.
//!
//! - 메인 HUD 창과 플로팅 위젯을 가진 daemon 애플리케이션 ([`app::HudApp`])
//! - 다크/라이트 팔레트 ([`theme`])
//! - 시스템 트레이 메뉴 ([`tray`])
//! - 플랫폼 네이티브 창 효과 (클릭 통과, 투명도)

pub mod app;
pub mod theme;
pub mod tray;
pub mod views;

#[cfg(target_os = "macos")]
pub mod native_macos;
#[cfg(target_os = "windows")]
pub mod native_windows;

pub use app::{HudApp, Message};
pub use tray::{TrayEvent, TrayManager};
