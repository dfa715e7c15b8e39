//! 화면에 표시되는 메트릭 스냅샷 모델.

use serde::{Deserialize, Serialize};

/// 한 번의 수집 주기 결과. 모든 필드는 표시용으로 가공된 값이다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// CPU 사용률 (0~100%)
    pub cpu_usage: u8,
    /// 메모리 사용률 (0~100%)
    pub ram_usage: u8,
    /// GPU 사용률 추정치 (0~100%)
    pub gpu_usage: u8,
    /// 루트 디스크 사용률 (0~100%)
    pub disk_usage: u8,
    /// 업로드 속도 (예: "12 KB/s")
    pub network_upload: String,
    /// 다운로드 속도 (예: "3 MB/s")
    pub network_download: String,
    /// CPU 온도 (°C)
    pub temperature: i32,
    /// 배터리 잔량 (0~100%)
    pub battery_level: u8,
    /// 현재 시각 "HH:MM:SS"
    pub current_time: String,
    /// 현재 날짜 "Month DD, YYYY"
    pub current_date: String,
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self {
            cpu_usage: 0,
            ram_usage: 0,
            gpu_usage: 0,
            disk_usage: 0,
            network_upload: "0 KB/s".to_string(),
            network_download: "0 KB/s".to_string(),
            temperature: 0,
            battery_level: 0,
            current_time: "00:00:00".to_string(),
            current_date: "January 1, 2024".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let snapshot = HudSnapshot::default();
        assert_eq!(snapshot.cpu_usage, 0);
        assert_eq!(snapshot.network_upload, "0 KB/s");
        assert_eq!(snapshot.current_time, "00:00:00");
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = HudSnapshot {
            cpu_usage: 42,
            network_download: "3 MB/s".to_string(),
            ..HudSnapshot::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: HudSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
