//! Error types for Pipelog

use std::path::PathBuf;

/// Pipelog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Number of logfiles must be at least 1 (got {0})")]
    InvalidRetention(usize),

    #[error("Max logfile size must be at least 1 byte (got {0})")]
    InvalidMaxSize(u64),

    #[error("Failed to open log file '{path}': {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to rotate '{from}' to '{to}': {source}")]
    RotateFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to evict oldest log file '{path}': {source}")]
    EvictFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for Pipelog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}
