//! # aerohud-core
//!
//! AeroHUD의 핵심 도메인 크레이트.
//!
//! - 사용자 설정 레코드와 JSON 저장소 ([`store::SettingsStore`])
//! - 화면에 표시되는 메트릭 스냅샷 모델 ([`models::HudSnapshot`])
//! - OS 로그인 시 자동 실행 등록 ([`autostart`])
//! - 공통 에러 타입 ([`error::CoreError`])

pub mod autostart;
pub mod error;
pub mod models;
pub mod settings;
pub mod store;

pub use error::CoreError;
pub use models::HudSnapshot;
pub use settings::{HudSettings, OverlayMode, PerformanceMode, Theme};
pub use store::SettingsStore;
