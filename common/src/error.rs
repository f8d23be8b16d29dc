//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (route table files etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging initialization error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;
