//! In-memory filesystem backend.

use super::{FileSystem, StorageError, StorageResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory filesystem for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl MemoryFileSystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn dir_exists(&self, path: &Path) -> bool {
        // The filesystem root always exists
        if path.parent().is_none() || path.as_os_str().is_empty() {
            return true;
        }
        self.dirs.read().map(|d| d.contains(path)).unwrap_or(false)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => self.dir_exists(parent),
            None => true,
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        let files = self.files.read().map_err(lock_error)?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.display().to_string()))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if !self.parent_exists(path) {
            return Err(StorageError::NotFound(format!(
                "parent directory of {}",
                path.display()
            )));
        }
        let mut files = self.files.write().map_err(lock_error)?;
        files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let is_file = self
            .files
            .read()
            .map(|f| f.contains_key(path))
            .unwrap_or(false);
        is_file || self.dir_exists(path)
    }

    fn move_item(&self, from: &Path, to: &Path) -> StorageResult<()> {
        if self.exists(to) {
            return Err(StorageError::AlreadyExists(to.display().to_string()));
        }
        if !self.parent_exists(to) {
            return Err(StorageError::NotFound(format!(
                "parent directory of {}",
                to.display()
            )));
        }
        let mut files = self.files.write().map_err(lock_error)?;
        let bytes = files
            .remove(from)
            .ok_or_else(|| StorageError::NotFound(from.display().to_string()))?;
        files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StorageResult<()> {
        let mut dirs = self.dirs.write().map_err(lock_error)?;
        for ancestor in path.ancestors() {
            if ancestor.parent().is_some() && !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn list(&self, dir: &Path) -> StorageResult<Vec<PathBuf>> {
        if !self.dir_exists(dir) {
            return Err(StorageError::NotFound(dir.display().to_string()));
        }
        let files = self.files.read().map_err(lock_error)?;
        Ok(files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_requires_parent() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/docs/note.drawing");

        assert!(fs.write(path, b"x").is_err());

        fs.create_dir_all(Path::new("/docs")).unwrap();
        fs.write(path, b"x").unwrap();
        assert_eq!(fs.read(path).unwrap(), b"x");
    }

    #[test]
    fn test_not_found() {
        let fs = MemoryFileSystem::new();
        let result = fs.read(Path::new("/nope"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_move_item() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.create_dir_all(Path::new("/b")).unwrap();
        fs.write(Path::new("/a/file"), b"data").unwrap();

        fs.move_item(Path::new("/a/file"), Path::new("/b/file")).unwrap();

        assert!(!fs.exists(Path::new("/a/file")));
        assert_eq!(fs.read(Path::new("/b/file")).unwrap(), b"data");
    }

    #[test]
    fn test_move_missing_source() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/b")).unwrap();

        let result = fs.move_item(Path::new("/a/file"), Path::new("/b/file"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/inbox/sub")).unwrap();
        fs.write(Path::new("/inbox/one"), b"1").unwrap();
        fs.write(Path::new("/inbox/two"), b"2").unwrap();
        fs.write(Path::new("/inbox/sub/three"), b"3").unwrap();

        let list = fs.list(Path::new("/inbox")).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&PathBuf::from("/inbox/one")));
        assert!(list.contains(&PathBuf::from("/inbox/two")));
    }
}
