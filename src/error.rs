//! Error handling for the job autopilot library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoApplyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AutoApplyError>;

/// Convert anyhow errors coming out of provider implementations
impl From<anyhow::Error> for AutoApplyError {
    fn from(err: anyhow::Error) -> Self {
        AutoApplyError::Transport(err.to_string())
    }
}
