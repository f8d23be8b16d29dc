//! エラー型定義
//!
//! デモエンドポイントのエラー（thiserror使用）

use axum::http::StatusCode;
use thiserror::Error;

/// Demo service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Upstream request failed
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ServiceError {
    /// Returns a safe error message for external clients.
    ///
    /// Full error details (upstream URLs etc.) only go to the server log.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Upstream(_) => "Upstream service unavailable",
            Self::Parse(_) => "Failed to parse upstream response",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias (Service)
pub type ServiceResult<T> = Result<T, ServiceError>;
