//! Storage abstraction for persistence.
//!
//! Documents never touch `std::fs` directly. Everything goes through a
//! [`FileSystem`], so the same code runs against the local disk, a cloud
//! container mounted as a directory, or the in-memory backend used by tests.

mod file;
mod location;
mod memory;
pub mod migration;

pub use file::LocalFileSystem;
pub use location::{
    CloudAccount, FilePaths, NoCloud, StaticCloudAccount, StorageLocation, StorageResolver,
    ARCHIVED_DIR_NAME, CLOUD_DOCUMENTS_DIR_NAME, CURRENT_FILE_NAME, INBOX_DIR_NAME,
    LEGACY_FILE_NAME, NOTE_FILE_EXTENSION, RENAMED_LEGACY_FILE_NAME,
};
pub use memory::MemoryFileSystem;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage location unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for filesystem backends.
///
/// Paths are absolute. Implementations must be Send + Sync so a single
/// backend can be shared between the document manager and the view model.
pub trait FileSystem: Send + Sync {
    /// Read a whole file.
    fn read(&self, path: &Path) -> StorageResult<Vec<u8>>;

    /// Write a whole file, replacing any previous content.
    /// The parent directory must already exist.
    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()>;

    /// Check if a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Move a file. Fails if the destination already exists.
    fn move_item(&self, from: &Path, to: &Path) -> StorageResult<()>;

    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> StorageResult<()>;

    /// List the files directly inside a directory.
    fn list(&self, dir: &Path) -> StorageResult<Vec<PathBuf>>;
}
