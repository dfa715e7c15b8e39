//! 설정 저장소.
//!
//! 플랫폼 설정 디렉터리의 JSON 파일 하나를 소유한다. 모든 변경 메서드는
//! 리턴 전에 동기로 저장하며, 저장 실패는 로그만 남기고 전파하지 않는다.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::autostart;
use crate::error::CoreError;
use crate::settings::{
    HudSettings, OverlayMode, PerformanceMode, Theme, MAX_WIDGET_OPACITY, MIN_WIDGET_OPACITY,
};

const SETTINGS_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "aerohud";

/// 플랫폼별 설정 디렉터리 (환경 변수 기반).
fn config_dir() -> Result<PathBuf, CoreError> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| CoreError::Config("APPDATA 환경 변수 없음".to_string()))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    }
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME")
            .map_err(|_| CoreError::Config("HOME 환경 변수 없음".to_string()))?;
        Ok(PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_NAME))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let home = std::env::var("HOME")
            .map_err(|_| CoreError::Config("HOME 환경 변수 없음".to_string()))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

/// JSON 파일 하나에 묶인 설정 저장소.
pub struct SettingsStore {
    settings: HudSettings,
    path: PathBuf,
}

impl SettingsStore {
    /// 기본 경로에서 설정을 읽는다. 파일이 없으면 기본값으로 생성한다.
    pub fn load() -> Result<Self, CoreError> {
        Self::with_path(config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// 지정한 경로의 설정 파일을 사용한다. 테스트용 생성자.
    pub fn with_path(path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let settings = if path.exists() {
            match Self::read_file(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("설정 파일 손상, 기본값으로 재설정: {e}");
                    let defaults = HudSettings::default();
                    Self::write_file(&path, &defaults)?;
                    defaults
                }
            }
        } else {
            let defaults = HudSettings::default();
            Self::write_file(&path, &defaults)?;
            info!("기본 설정 파일 생성: {}", path.display());
            defaults
        };

        let mut store = Self { settings, path };
        store.check_startup();
        Ok(store)
    }

    fn read_file(path: &Path) -> Result<HudSettings, CoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_file(path: &Path, settings: &HudSettings) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 현재 설정 참조.
    pub fn get(&self) -> &HudSettings {
        &self.settings
    }

    /// 설정 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 전체 레코드를 디스크에 쓴다.
    pub fn save(&self) -> Result<(), CoreError> {
        Self::write_file(&self.path, &self.settings)
    }

    /// 저장 실패를 로그로만 처리하는 내부 저장.
    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("설정 저장 실패: {e}");
        }
    }

    // ── 변경 메서드 (모두 즉시 저장) ──

    /// 테마를 뒤집고 새 테마를 돌려준다.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.persist();
        self.settings.theme
    }

    /// 오버레이 모드를 뒤집고 새 모드를 돌려준다.
    pub fn toggle_overlay_mode(&mut self) -> OverlayMode {
        self.settings.overlay_mode = self.settings.overlay_mode.toggled();
        self.persist();
        self.settings.overlay_mode
    }

    pub fn set_performance_mode(&mut self, mode: PerformanceMode) {
        self.settings.performance_mode = mode;
        self.persist();
    }

    pub fn toggle_auto_hide(&mut self) -> bool {
        self.settings.widget_auto_hide = !self.settings.widget_auto_hide;
        self.persist();
        self.settings.widget_auto_hide
    }

    pub fn toggle_click_through(&mut self) -> bool {
        self.settings.widget_click_through = !self.settings.widget_click_through;
        self.persist();
        self.settings.widget_click_through
    }

    /// 위젯 투명도를 [0.1, 1.0]으로 클램프해 저장한다.
    pub fn set_widget_opacity(&mut self, opacity: f64) {
        self.settings.widget_opacity = opacity.clamp(MIN_WIDGET_OPACITY, MAX_WIDGET_OPACITY);
        self.persist();
    }

    pub fn set_widget_visible(&mut self, visible: bool) {
        self.settings.widget_visible = visible;
        self.persist();
    }

    pub fn set_main_window_position(&mut self, x: i32, y: i32) {
        self.settings.main_window_position = [x, y];
        self.persist();
    }

    pub fn set_widget_position(&mut self, x: i32, y: i32) {
        self.settings.widget_position = [x, y];
        self.persist();
    }

    // ── 시작 프로그램 연동 ──

    /// OS 등록 상태를 읽어 메모리 값과 어긋나면 메모리 쪽을 맞춘다.
    pub fn check_startup(&mut self) {
        let registered = autostart::check_autostart_status();
        if registered != self.settings.startup_enabled {
            debug!(
                "시작 프로그램 상태 불일치: 설정={}, OS={}",
                self.settings.startup_enabled, registered
            );
            self.settings.startup_enabled = registered;
        }
    }

    /// OS에 시작 프로그램을 등록한다. 성공 여부를 돌려준다.
    pub fn enable_startup(&mut self) -> bool {
        match autostart::enable_autostart() {
            Ok(()) => {
                self.settings.startup_enabled = true;
                self.persist();
                info!("시작 프로그램 등록 완료");
                true
            }
            Err(e) => {
                warn!("시작 프로그램 등록 실패: {e}");
                false
            }
        }
    }

    /// OS 시작 프로그램 등록을 해제한다. 성공 여부를 돌려준다.
    pub fn disable_startup(&mut self) -> bool {
        match autostart::disable_autostart() {
            Ok(()) => {
                self.settings.startup_enabled = false;
                self.persist();
                info!("시작 프로그램 등록 해제 완료");
                true
            }
            Err(e) => {
                warn!("시작 프로그램 해제 실패: {e}");
                false
            }
        }
    }

    /// 등록 상태를 뒤집고 최종 상태를 돌려준다.
    pub fn toggle_startup(&mut self) -> bool {
        if self.settings.startup_enabled {
            self.disable_startup();
        } else {
            self.enable_startup();
        }
        self.settings.startup_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::with_path(dir.path().join(SETTINGS_FILE_NAME)).unwrap()
    }

    #[test]
    fn test_fresh_install_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.path().exists());
        assert_eq!(*store.get(), HudSettings::default());

        let on_disk: HudSettings =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, HudSettings::default());
    }

    #[test]
    fn test_mutation_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);

        let mut store = SettingsStore::with_path(path.clone()).unwrap();
        store.toggle_theme();
        store.set_performance_mode(PerformanceMode::HighPerformance);
        store.set_widget_position(640, 480);

        let reloaded = SettingsStore::with_path(path).unwrap();
        assert_eq!(reloaded.get().theme, Theme::Light);
        assert_eq!(
            reloaded.get().performance_mode,
            PerformanceMode::HighPerformance
        );
        assert_eq!(reloaded.get().widget_position, [640, 480]);
    }

    #[test]
    fn test_corrupt_file_resets_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ not json at all").unwrap();

        let store = SettingsStore::with_path(path.clone()).unwrap();
        assert_eq!(*store.get(), HudSettings::default());

        // 손상 파일은 즉시 기본값으로 덮어쓴다
        let on_disk: HudSettings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, HudSettings::default());
    }

    #[test]
    fn test_opacity_clamp() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set_widget_opacity(0.01);
        assert_eq!(store.get().widget_opacity, MIN_WIDGET_OPACITY);

        store.set_widget_opacity(2.5);
        assert_eq!(store.get().widget_opacity, MAX_WIDGET_OPACITY);

        store.set_widget_opacity(0.7);
        assert_eq!(store.get().widget_opacity, 0.7);
    }

    #[test]
    fn test_toggle_theme_returns_new_value() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(store.toggle_theme(), Theme::Light);
        assert_eq!(store.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_overlay_mode_two_cycle() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(store.toggle_overlay_mode(), OverlayMode::AllScreens);
        assert_eq!(store.toggle_overlay_mode(), OverlayMode::DesktopOnly);
    }

    #[test]
    fn test_missing_keys_fill_defaults_and_survive_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{"theme": "light"}"#).unwrap();

        let mut store = SettingsStore::with_path(path.clone()).unwrap();
        assert_eq!(store.get().theme, Theme::Light);
        assert_eq!(store.get().widget_opacity, 0.9);

        store.set_widget_visible(true);
        let reloaded = SettingsStore::with_path(path).unwrap();
        assert_eq!(reloaded.get().theme, Theme::Light);
        assert!(reloaded.get().widget_visible);
    }
}
