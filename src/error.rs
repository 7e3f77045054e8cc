use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid temperature '{value}' in partition at byte {offset} of {path}")]
    InvalidTemperature {
        value: String,
        offset: u64,
        path: PathBuf,
    },

    #[error("No record terminator within {window} bytes at offset {offset}")]
    BoundaryNotFound { offset: u64, window: usize },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
