//! Application shell errors.

use paperink_core::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("Invalid session {path}: {message}")]
    Session { path: PathBuf, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
