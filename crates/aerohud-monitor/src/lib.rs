//! # aerohud-monitor
//!
//! sysinfo 기반 시스템 메트릭 수집기. UI는 측정하지 않고 이 크레이트가
//! 만든 스냅샷만 그린다.

pub mod poller;

pub use poller::{derived_gpu_usage, format_speed, transfer_rates, HudMonitor};
