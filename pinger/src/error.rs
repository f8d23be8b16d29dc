//! エラー型定義
//!
//! プローブ実行前の設定・初期化エラー。
//! 個々のプローブの失敗はエラーではなく `ProbeOutcome::Failed` として扱う。

use route_pinger_common::error::CommonError;
use thiserror::Error;

/// Pinger error type
#[derive(Debug, Error)]
pub enum PingerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias (Pinger)
pub type PingerResult<T> = Result<T, PingerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_error_is_transparent() {
        let error: PingerError = CommonError::Validation("base_url must not be empty".into()).into();
        assert_eq!(
            error.to_string(),
            "Validation error: base_url must not be empty"
        );
    }

    #[test]
    fn test_invalid_base_url_display() {
        let error = PingerError::InvalidBaseUrl("nope".to_string());
        assert_eq!(error.to_string(), "Invalid base URL: nope");
    }
}
