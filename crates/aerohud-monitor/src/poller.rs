//! 주기 수집기.
//!
//! `update_all()` 한 번이 화면 한 프레임에 해당하는 [`HudSnapshot`]을
//! 만든다. 측정 실패는 절대 에러로 전파하지 않고 고정 폴백 값을 쓴다.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use aerohud_core::models::HudSnapshot;
use sysinfo::{Components, Disks, Networks, System};
use tracing::{debug, warn};

/// CPU 사용률 2회 샘플 사이의 대기. `update_all()`은 이만큼 블로킹된다.
const CPU_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);
/// 온도 센서를 못 읽을 때의 폴백 (°C).
const FALLBACK_TEMPERATURE: i32 = 40;
/// 배터리가 없거나 못 읽을 때의 폴백 (%).
const FALLBACK_BATTERY: u8 = 100;

const MAIN_MOUNT: &str = if cfg!(windows) { "C:\\" } else { "/" };

/// 시스템 메트릭 수집기. sysinfo 핸들과 직전 네트워크 카운터를 소유한다.
pub struct HudMonitor {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    battery_manager: Option<battery::Manager>,
    last_net_sent: u64,
    last_net_recv: u64,
    last_net_at: Instant,
    snapshot: HudSnapshot,
}

impl HudMonitor {
    pub fn new() -> Self {
        let networks = Networks::new_with_refreshed_list();
        let (sent, recv) = total_net_counters(&networks);
        let battery_manager = match battery::Manager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                warn!("배터리 매니저 초기화 실패: {e}");
                None
            }
        };
        Self {
            sys: System::new_all(),
            disks: Disks::new_with_refreshed_list(),
            networks,
            components: Components::new_with_refreshed_list(),
            battery_manager,
            last_net_sent: sent,
            last_net_recv: recv,
            last_net_at: Instant::now(),
            snapshot: HudSnapshot::default(),
        }
    }

    /// 마지막으로 수집한 스냅샷.
    pub fn snapshot(&self) -> &HudSnapshot {
        &self.snapshot
    }

    /// 모든 메트릭을 고정 순서로 갱신한다.
    /// CPU → RAM → GPU → 디스크 → 네트워크 → 온도 → 배터리 → 시계.
    pub fn update_all(&mut self) {
        self.update_cpu();
        self.update_ram();
        self.update_gpu();
        self.update_disk();
        self.update_network();
        self.update_temperature();
        self.update_battery();
        self.update_clock();
        debug!(
            "메트릭 수집: cpu={}% ram={}% disk={}% temp={}°C",
            self.snapshot.cpu_usage,
            self.snapshot.ram_usage,
            self.snapshot.disk_usage,
            self.snapshot.temperature
        );
    }

    fn update_cpu(&mut self) {
        // 짧은 간격의 2회 샘플이어야 0%로 뭉개지지 않는다
        self.sys.refresh_cpu_usage();
        thread::sleep(CPU_SAMPLE_INTERVAL);
        self.sys.refresh_cpu_usage();
        self.snapshot.cpu_usage = (self.sys.global_cpu_usage() as u8).min(100);
    }

    fn update_ram(&mut self) {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        self.snapshot.ram_usage = if total > 0 {
            ((self.sys.used_memory() * 100) / total) as u8
        } else {
            0
        };
    }

    fn update_gpu(&mut self) {
        self.snapshot.gpu_usage = derived_gpu_usage(self.snapshot.cpu_usage);
    }

    fn update_disk(&mut self) {
        self.disks.refresh(true);
        self.snapshot.disk_usage = root_disk_usage(&self.disks).unwrap_or(0);
    }

    fn update_network(&mut self) {
        self.networks.refresh(true);
        let (sent, recv) = total_net_counters(&self.networks);
        let elapsed = self.last_net_at.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            let (up, down) =
                transfer_rates(sent, recv, self.last_net_sent, self.last_net_recv, elapsed);
            self.snapshot.network_upload = format_speed(up);
            self.snapshot.network_download = format_speed(down);
        }
        self.last_net_sent = sent;
        self.last_net_recv = recv;
        self.last_net_at = Instant::now();
    }

    fn update_temperature(&mut self) {
        self.components.refresh(true);
        self.snapshot.temperature =
            cpu_component_temperature(&self.components).unwrap_or(FALLBACK_TEMPERATURE);
    }

    fn update_battery(&mut self) {
        self.snapshot.battery_level =
            read_battery_level(self.battery_manager.as_ref()).unwrap_or(FALLBACK_BATTERY);
    }

    fn update_clock(&mut self) {
        let now = chrono::Local::now();
        self.snapshot.current_time = now.format("%H:%M:%S").to_string();
        self.snapshot.current_date = now.format("%B %d, %Y").to_string();
    }
}

impl Default for HudMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU 사용률 추정치. 전용 백엔드가 없어 CPU 기반 근사값을 쓴다.
pub fn derived_gpu_usage(cpu_usage: u8) -> u8 {
    cpu_usage.saturating_add(10).min(100)
}

/// 카운터 차분을 초당 바이트로 환산한다.
pub fn transfer_rates(
    sent: u64,
    recv: u64,
    prev_sent: u64,
    prev_recv: u64,
    elapsed_secs: f64,
) -> (f64, f64) {
    let up = sent.saturating_sub(prev_sent) as f64 / elapsed_secs;
    let down = recv.saturating_sub(prev_recv) as f64 / elapsed_secs;
    (up, down)
}

/// 초당 바이트를 1024 단위로 끊어 정수 표기한다.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let speed = bytes_per_sec.max(0.0);
    if speed < 1024.0 {
        format!("{} B/s", speed as u64)
    } else if speed < 1024.0 * 1024.0 {
        format!("{} KB/s", (speed / 1024.0) as u64)
    } else {
        format!("{} MB/s", (speed / (1024.0 * 1024.0)) as u64)
    }
}

fn total_net_counters(networks: &Networks) -> (u64, u64) {
    networks
        .iter()
        .fold((0, 0), |(sent, recv), (_name, data)| {
            (
                sent + data.total_transmitted(),
                recv + data.total_received(),
            )
        })
}

fn root_disk_usage(disks: &Disks) -> Option<u8> {
    let list = disks.list();
    let disk = list
        .iter()
        .find(|d| d.mount_point() == Path::new(MAIN_MOUNT))
        .or_else(|| list.first())?;
    let total = disk.total_space();
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(disk.available_space());
    Some(((used * 100) / total) as u8)
}

fn cpu_component_temperature(components: &Components) -> Option<i32> {
    components
        .list()
        .iter()
        .find(|c| {
            let label = c.label().to_ascii_lowercase();
            label.contains("cpu")
                || label.contains("core")
                || label.contains("package")
                || label.contains("tctl")
        })
        .and_then(|c| c.temperature())
        .map(|t| t as i32)
}

fn read_battery_level(manager: Option<&battery::Manager>) -> Option<u8> {
    let manager = manager?;
    let mut batteries = manager.batteries().ok()?;
    let battery = batteries.next()?.ok()?;
    let percent = battery.state_of_charge().value * 100.0;
    Some(percent.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speed_thresholds() {
        assert_eq!(format_speed(0.0), "0 B/s");
        assert_eq!(format_speed(1023.0), "1023 B/s");
        assert_eq!(format_speed(1024.0), "1 KB/s");
        assert_eq!(format_speed(2048.0), "2 KB/s");
        assert_eq!(format_speed(1024.0 * 1024.0 - 1.0), "1023 KB/s");
        assert_eq!(format_speed(1024.0 * 1024.0), "1 MB/s");
        assert_eq!(format_speed(5.5 * 1024.0 * 1024.0), "5 MB/s");
    }

    #[test]
    fn test_format_speed_negative_clamps_to_zero() {
        assert_eq!(format_speed(-42.0), "0 B/s");
    }

    #[test]
    fn test_transfer_rates() {
        let (up, down) = transfer_rates(3000, 5000, 1000, 1000, 2.0);
        assert_eq!(up, 1000.0);
        assert_eq!(down, 2000.0);
    }

    #[test]
    fn test_transfer_rates_counter_reset() {
        // 카운터가 뒤로 가면 (인터페이스 리셋) 0으로 처리한다
        let (up, down) = transfer_rates(100, 100, 5000, 5000, 1.0);
        assert_eq!(up, 0.0);
        assert_eq!(down, 0.0);
    }

    #[test]
    fn test_derived_gpu_usage_caps_at_100() {
        assert_eq!(derived_gpu_usage(0), 10);
        assert_eq!(derived_gpu_usage(50), 60);
        assert_eq!(derived_gpu_usage(95), 100);
        assert_eq!(derived_gpu_usage(100), 100);
    }

    #[test]
    fn test_update_all_produces_bounded_values() {
        let mut monitor = HudMonitor::new();
        monitor.update_all();
        let snapshot = monitor.snapshot();

        assert!(snapshot.cpu_usage <= 100);
        assert!(snapshot.ram_usage <= 100);
        assert!(snapshot.gpu_usage <= 100);
        assert!(snapshot.disk_usage <= 100);
        assert!(snapshot.battery_level <= 100);
        assert!(snapshot.network_upload.ends_with("B/s"));
        assert!(snapshot.network_download.ends_with("B/s"));
        // "HH:MM:SS"
        assert_eq!(snapshot.current_time.len(), 8);
    }
}
