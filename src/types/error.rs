use thiserror::Error;

/// streakdeck error types
#[derive(Error, Debug)]
pub enum StreakdeckError {
    /// Failed to parse JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Post log operation failed
    #[error("post log error: {0}")]
    Store(String),

    /// Activity data source failed
    #[error("data source error: {0}")]
    Source(String),
}

/// Result type alias for streakdeck
pub type Result<T> = std::result::Result<T, StreakdeckError>;
