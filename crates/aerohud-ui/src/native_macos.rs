//! macOS 네이티브 API.
//!
//! NSWindow를 통한 위젯 클릭 통과(ignoresMouseEvents)와 창 투명도
//! (alphaValue) 적용. 대상 창은 NSApplication의 창 목록에서 제목으로
//! 찾는다.
//!
//! objc2-app-kit 기반 구현 (최신 Rust-ObjC 바인딩)

use objc2::rc::Retained;
use objc2::MainThreadMarker;
use objc2_app_kit::{NSApplication, NSWindow};
use tracing::{debug, warn};

/// MainThreadMarker 획득 (GUI 앱이므로 메인 스레드에서 호출됨)
fn get_mtm() -> Option<MainThreadMarker> {
    // iced 앱은 메인 스레드에서 update() 호출
    MainThreadMarker::new()
}

/// 제목이 일치하는 창 검색
fn find_window_by_title(mtm: MainThreadMarker, title: &str) -> Option<Retained<NSWindow>> {
    let app = NSApplication::sharedApplication(mtm);
    app.windows()
        .iter()
        .find(|window| window.title().to_string() == title)
}

/// 클릭 통과 설정. 켜진 창은 마우스 입력을 아래 창으로 넘긴다.
pub fn set_click_through(window_title: &str, enabled: bool) {
    let Some(mtm) = get_mtm() else {
        warn!("macOS: 메인 스레드가 아니므로 클릭 통과 적용 실패");
        return;
    };
    let Some(window) = find_window_by_title(mtm, window_title) else {
        warn!("macOS: 창을 찾지 못함: {window_title}");
        return;
    };

    window.setIgnoresMouseEvents(enabled);
    debug!("macOS: 클릭 통과 = {enabled} ({window_title})");
}

/// 창 전체 투명도 설정 (0.0 ~ 1.0).
pub fn set_window_opacity(window_title: &str, opacity: f64) {
    let Some(mtm) = get_mtm() else {
        warn!("macOS: 메인 스레드가 아니므로 투명도 적용 실패");
        return;
    };
    let Some(window) = find_window_by_title(mtm, window_title) else {
        warn!("macOS: 창을 찾지 못함: {window_title}");
        return;
    };

    window.setAlphaValue(opacity.clamp(0.0, 1.0));
    debug!("macOS: 창 투명도 = {opacity} ({window_title})");
}

#[cfg(test)]
mod tests {
    // 테스트는 GUI 환경에서만 가능
}
