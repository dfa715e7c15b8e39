//! # aerohud-app
//!
//! AeroHUD 바이너리 진입점.
//! 로깅 초기화 → 설정 로드 → 시스템 트레이 생성 (메인 스레드 필수) →
//! iced daemon 실행.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aerohud_core::store::SettingsStore;
use aerohud_ui::app::HudApp;
use aerohud_ui::tray::TrayManager;

fn main() -> Result<()> {
    // tracing 초기화 (RUST_LOG가 있으면 그쪽 우선)
    let log_filter = "aerohud_app=info,aerohud_ui=info,aerohud_core=info,aerohud_monitor=info";
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();

    info!("AeroHUD {} 시작", env!("CARGO_PKG_VERSION"));

    // 설정 로드 (파일이 없으면 기본값 생성)
    let settings = SettingsStore::load()?;
    info!("설정 파일: {}", settings.path().display());

    // 시스템 트레이 초기화 (메인 스레드 필수 - macOS)
    // 실패해도 창은 띄운다. 트레이 메뉴만 빠진다
    let (tray, tray_rx) = match TrayManager::new(settings.get()) {
        Ok((manager, rx)) => {
            info!("시스템 트레이 초기화 완료");
            (Some(manager), Some(rx))
        }
        Err(e) => {
            warn!("시스템 트레이 초기화 실패: {e}");
            (None, None)
        }
    };

    // iced daemon 실행 (메인 창 + 플로팅 위젯)
    let result = iced::daemon(HudApp::title, HudApp::update, HudApp::view)
        .theme(HudApp::theme)
        .subscription(HudApp::subscription)
        .run_with(move || HudApp::new(settings, tray, tray_rx));

    info!("AeroHUD 종료");
    result.map_err(|e| anyhow::anyhow!("GUI 실행 오류: {e}"))
}
