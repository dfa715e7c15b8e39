//! OS 로그인 시 자동 실행 등록.
//!
//! 등록 여부의 기준은 항상 OS 쪽 실체다 (레지스트리 값, plist 파일,
//! XDG autostart 엔트리). 설정 파일의 플래그는 캐시에 불과하다.

use crate::error::CoreError;

#[cfg(target_os = "windows")]
const RUN_SUBKEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
const AUTOSTART_APP_NAME: &str = "AeroHUD";

fn current_exe_path() -> Result<String, CoreError> {
    let exe = std::env::current_exe()
        .map_err(|e| CoreError::Autostart(format!("실행 파일 경로 조회 실패: {e}")))?;
    Ok(exe.display().to_string())
}

/// 현재 OS에 자동 실행이 등록되어 있는지 확인한다.
pub fn check_autostart_status() -> bool {
    #[cfg(target_os = "windows")]
    {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_READ};
        use winreg::RegKey;

        RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(RUN_SUBKEY, KEY_READ)
            .and_then(|key| key.get_value::<String, _>(AUTOSTART_APP_NAME))
            .is_ok()
    }
    #[cfg(target_os = "macos")]
    {
        launch_agent_path().map(|p| p.exists()).unwrap_or(false)
    }
    #[cfg(target_os = "linux")]
    {
        desktop_entry_path().map(|p| p.exists()).unwrap_or(false)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        false
    }
}

/// 자동 실행을 등록한다.
pub fn enable_autostart() -> Result<(), CoreError> {
    #[cfg(target_os = "windows")]
    {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};
        use winreg::RegKey;

        let key = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(RUN_SUBKEY, KEY_SET_VALUE)
            .map_err(|e| CoreError::Autostart(format!("Run 키 열기 실패: {e}")))?;
        let command = format!("\"{}\"", current_exe_path()?);
        key.set_value(AUTOSTART_APP_NAME, &command)
            .map_err(|e| CoreError::Autostart(format!("레지스트리 값 쓰기 실패: {e}")))?;
        Ok(())
    }
    #[cfg(target_os = "macos")]
    {
        let path = launch_agent_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, launch_agent_plist(&current_exe_path()?))?;
        // load 실패는 치명적이지 않다. 다음 로그인 때 자동으로 잡힌다
        let _ = std::process::Command::new("launchctl")
            .arg("load")
            .arg(&path)
            .status();
        Ok(())
    }
    #[cfg(target_os = "linux")]
    {
        let path = desktop_entry_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, desktop_entry(&current_exe_path()?))?;
        Ok(())
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(CoreError::Autostart("지원하지 않는 플랫폼".to_string()))
    }
}

/// 자동 실행 등록을 해제한다. 이미 해제된 상태면 성공으로 본다.
pub fn disable_autostart() -> Result<(), CoreError> {
    #[cfg(target_os = "windows")]
    {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};
        use winreg::RegKey;

        let key = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(RUN_SUBKEY, KEY_SET_VALUE)
            .map_err(|e| CoreError::Autostart(format!("Run 키 열기 실패: {e}")))?;
        match key.delete_value(AUTOSTART_APP_NAME) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Autostart(format!(
                "레지스트리 값 삭제 실패: {e}"
            ))),
        }
    }
    #[cfg(target_os = "macos")]
    {
        let path = launch_agent_path()?;
        if path.exists() {
            let _ = std::process::Command::new("launchctl")
                .arg("unload")
                .arg(&path)
                .status();
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
    #[cfg(target_os = "linux")]
    {
        let path = desktop_entry_path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(CoreError::Autostart("지원하지 않는 플랫폼".to_string()))
    }
}

#[cfg(target_os = "macos")]
fn launch_agent_path() -> Result<std::path::PathBuf, CoreError> {
    let home = std::env::var("HOME")
        .map_err(|_| CoreError::Autostart("HOME 환경 변수 없음".to_string()))?;
    Ok(std::path::PathBuf::from(home)
        .join("Library")
        .join("LaunchAgents")
        .join("com.aerohud.overlay.plist"))
}

#[cfg(target_os = "macos")]
fn launch_agent_plist(exe_path: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.aerohud.overlay</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe_path}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#
    )
}

#[cfg(target_os = "linux")]
fn desktop_entry_path() -> Result<std::path::PathBuf, CoreError> {
    let home = std::env::var("HOME")
        .map_err(|_| CoreError::Autostart("HOME 환경 변수 없음".to_string()))?;
    Ok(std::path::PathBuf::from(home)
        .join(".config")
        .join("autostart")
        .join("aerohud.desktop"))
}

#[cfg(target_os = "linux")]
fn desktop_entry(exe_path: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={AUTOSTART_APP_NAME}\n\
         Exec={exe_path}\n\
         X-GNOME-Autostart-enabled=true\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_does_not_panic() {
        // 등록 여부는 환경에 따라 다르다. 호출 가능성만 확인한다
        let _ = check_autostart_status();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_desktop_entry_contains_exec() {
        let entry = desktop_entry("/usr/bin/aerohud");
        assert!(entry.contains("Exec=/usr/bin/aerohud"));
        assert!(entry.contains("Name=AeroHUD"));
    }
}
