//! Windows 네이티브 API.
//!
//! Win32 확장 스타일로 위젯의 클릭 통과(WS_EX_TRANSPARENT)와
//! 레이어드 창 투명도(SetLayeredWindowAttributes)를 적용한다.
//! 대상 창은 현재 프로세스의 창 중 제목으로 찾는다.

use tracing::{debug, warn};
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowLongPtrW, GetWindowTextW, GetWindowThreadProcessId,
    SetLayeredWindowAttributes, SetWindowLongPtrW, GWL_EXSTYLE, LWA_ALPHA, WS_EX_LAYERED,
    WS_EX_TRANSPARENT,
};

struct TitleSearch {
    title: Vec<u16>,
    found: HWND,
}

/// 현재 프로세스의 창 중 제목이 일치하는 핸들 검색
fn find_window_by_title(title: &str) -> Option<HWND> {
    let mut search = TitleSearch {
        title: title.encode_utf16().collect(),
        found: std::ptr::null_mut(),
    };

    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: isize) -> i32 {
        let search = &mut *(lparam as *mut TitleSearch);
        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, &mut pid);
        if pid != std::process::id() {
            return 1; // 계속 열거
        }

        let mut buf = [0u16; 256];
        let len = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
        if len > 0 && buf[..len as usize] == search.title[..] {
            search.found = hwnd;
            return 0; // 찾음, 열거 중단
        }
        1
    }

    unsafe {
        EnumWindows(
            Some(enum_callback),
            &mut search as *mut TitleSearch as isize,
        );
    }

    if search.found.is_null() {
        None
    } else {
        Some(search.found)
    }
}

fn opacity_to_alpha(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 클릭 통과 설정.
///
/// WS_EX_TRANSPARENT가 켜진 창은 마우스 입력을 아래 창으로 넘긴다.
/// WS_EX_LAYERED는 켠 채로 두고 투명도만 다시 적용한다.
pub fn set_click_through(window_title: &str, enabled: bool, opacity: f64) {
    let Some(hwnd) = find_window_by_title(window_title) else {
        warn!("Windows: 창을 찾지 못함: {window_title}");
        return;
    };

    unsafe {
        let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        if enabled {
            ex_style |= (WS_EX_TRANSPARENT | WS_EX_LAYERED) as isize;
        } else {
            ex_style &= !(WS_EX_TRANSPARENT as isize);
            ex_style |= WS_EX_LAYERED as isize;
        }
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);
        SetLayeredWindowAttributes(hwnd, 0, opacity_to_alpha(opacity), LWA_ALPHA);
    }
    debug!("Windows: 클릭 통과 = {enabled} ({window_title})");
}

/// 창 전체 투명도 설정 (0.0 ~ 1.0).
pub fn set_window_opacity(window_title: &str, opacity: f64) {
    let Some(hwnd) = find_window_by_title(window_title) else {
        warn!("Windows: 창을 찾지 못함: {window_title}");
        return;
    };

    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style | WS_EX_LAYERED as isize);
        SetLayeredWindowAttributes(hwnd, 0, opacity_to_alpha(opacity), LWA_ALPHA);
    }
    debug!("Windows: 창 투명도 = {opacity} ({window_title})");
}

#[cfg(test)]
mod tests {
    use super::*;

    // 창 조작 테스트는 GUI 환경에서만 가능

    #[test]
    fn alpha_conversion() {
        assert_eq!(opacity_to_alpha(0.0), 0);
        assert_eq!(opacity_to_alpha(1.0), 255);
        assert_eq!(opacity_to_alpha(2.0), 255);
        assert_eq!(opacity_to_alpha(0.5), 128);
    }
}
