//! Filesystem backend for native platforms.

use super::{FileSystem, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem backend on top of `std::fs`.
///
/// A cloud container mounted as a directory is handled by the same backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem backend.
    pub fn new() -> Self {
        Self
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound(path.display().to_string())
    } else {
        StorageError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
    }
}

impl FileSystem for LocalFileSystem {
    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        fs::read(path).map_err(|e| io_error("read", path, e))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        fs::write(path, bytes).map_err(|e| io_error("write", path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn move_item(&self, from: &Path, to: &Path) -> StorageResult<()> {
        if !from.exists() {
            return Err(StorageError::NotFound(from.display().to_string()));
        }
        if to.exists() {
            return Err(StorageError::AlreadyExists(to.display().to_string()));
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                // Cross-device moves (local disk <-> cloud mount) need copy + remove
                log::debug!(
                    "rename {} -> {} failed ({}), falling back to copy",
                    from.display(),
                    to.display(),
                    rename_err
                );
                fs::copy(from, to).map_err(|e| io_error("copy", from, e))?;
                fs::remove_file(from).map_err(|e| io_error("remove", from, e))
            }
        }
    }

    fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        fs::create_dir_all(path).map_err(|e| io_error("create directory", path, e))
    }

    fn list(&self, dir: &Path) -> StorageResult<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| io_error("read directory", dir, e))?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let path = dir.path().join("note.drawing");

        fs.write(&path, b"hello").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();

        let result = fs.read(&dir.path().join("missing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_move_item() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let from = dir.path().join("a");
        let to = dir.path().join("b");

        fs.write(&from, b"data").unwrap();
        fs.move_item(&from, &to).unwrap();

        assert!(!fs.exists(&from));
        assert_eq!(fs.read(&to).unwrap(), b"data");
    }

    #[test]
    fn test_move_item_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();
        let from = dir.path().join("a");
        let to = dir.path().join("b");

        fs.write(&from, b"new").unwrap();
        fs.write(&to, b"old").unwrap();

        let result = fs.move_item(&from, &to);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
        assert_eq!(fs.read(&to).unwrap(), b"old");
        assert!(fs.exists(&from));
    }

    #[test]
    fn test_list_only_files() {
        let dir = tempdir().unwrap();
        let fs = LocalFileSystem::new();

        fs.write(&dir.path().join("one"), b"1").unwrap();
        fs.write(&dir.path().join("two"), b"2").unwrap();
        fs.create_dir_all(&dir.path().join("nested")).unwrap();

        let files = fs.list(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }
}
