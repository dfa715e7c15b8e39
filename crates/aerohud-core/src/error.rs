//! AeroHUD 공통 에러 타입.

use thiserror::Error;

/// 코어 계층에서 발생하는 모든 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 파일 처리 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 파일 입출력 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// OS 시작 프로그램 등록/해제 에러
    #[error("시작 프로그램 에러: {0}")]
    Autostart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Config("파일 없음".to_string());
        assert_eq!(err.to_string(), "설정 에러: 파일 없음");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: CoreError = serde_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
