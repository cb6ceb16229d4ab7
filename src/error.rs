//! Storage Errors

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("failed to read from storage: {0}")]
    Read(String),

    #[error("failed to write to storage: {0}")]
    Write(String),

    #[error("failed to encode items: {0}")]
    Encode(#[from] serde_json::Error),
}
