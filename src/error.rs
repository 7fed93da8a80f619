//! Crate-wide error types.

use thiserror::Error;

pub type SortResult<T> = Result<T, SortError>;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid event log: {0}")]
    InvalidLog(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("trace error: {0}")]
    Trace(String),
}
