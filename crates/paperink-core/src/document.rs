//! Note document: one drawing persisted as a single file.
//!
//! The lifecycle mirrors a platform document class. Open and save report
//! their outcome through a completion callback carrying a success flag;
//! failures are logged here and never propagated further.

use crate::drawing::Drawing;
use crate::storage::{FileSystem, StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Persisted content of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntity {
    pub id: Uuid,
    pub drawing: Drawing,
    /// Last edit, in milliseconds since the Unix epoch.
    pub updated_date: u64,
}

impl NoteEntity {
    pub fn new(drawing: Drawing) -> Self {
        Self {
            id: Uuid::new_v4(),
            drawing,
            updated_date: now_millis(),
        }
    }
}

impl Default for NoteEntity {
    fn default() -> Self {
        Self::new(Drawing::new())
    }
}

/// How a save treats the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOperation {
    /// Create a new file. Fails if one already exists.
    ForCreating,
    /// Replace an existing file. Fails if there is none.
    ForOverwriting,
}

/// Kinds of change recorded against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Done,
    Undone,
    Redone,
    Cleared,
}

/// Lifecycle state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    #[default]
    Closed,
    Normal,
    SavingError,
}

/// A note bound to a file.
#[derive(Debug, Clone)]
pub struct NoteDocument {
    file_url: PathBuf,
    pub entity: NoteEntity,
    state: DocumentState,
    change_count: u32,
}

impl NoteDocument {
    pub fn new(file_url: PathBuf, entity: NoteEntity) -> Self {
        Self {
            file_url,
            entity,
            state: DocumentState::Closed,
            change_count: 0,
        }
    }

    pub fn file_url(&self) -> &Path {
        &self.file_url
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DocumentState::Normal
    }

    /// Serialized form of the entity.
    pub fn contents(&self) -> StorageResult<Vec<u8>> {
        serde_json::to_vec_pretty(&self.entity)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Replace the entity from serialized bytes.
    pub fn load_from_contents(&mut self, bytes: &[u8]) -> StorageResult<()> {
        self.entity = serde_json::from_slice(bytes).map_err(|e| {
            StorageError::Serialization(format!(
                "Failed to parse {}: {}",
                self.file_url.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Read the file and enter the normal state.
    pub fn open(&mut self, fs: &dyn FileSystem, completion: impl FnOnce(bool)) {
        let result = fs
            .read(&self.file_url)
            .and_then(|bytes| self.load_from_contents(&bytes));

        match result {
            Ok(()) => {
                self.state = DocumentState::Normal;
                self.change_count = 0;
                completion(true);
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", self.file_url.display(), e);
                completion(false);
            }
        }
    }

    /// Write the entity to `url`, which becomes the document's file.
    pub fn save(
        &mut self,
        fs: &dyn FileSystem,
        url: &Path,
        operation: SaveOperation,
        completion: impl FnOnce(bool),
    ) {
        match self.write_to(fs, url, operation) {
            Ok(()) => {
                self.file_url = url.to_path_buf();
                self.change_count = 0;
                if self.state == DocumentState::SavingError {
                    self.state = DocumentState::Normal;
                }
                completion(true);
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", url.display(), e);
                if self.state == DocumentState::Normal {
                    self.state = DocumentState::SavingError;
                }
                completion(false);
            }
        }
    }

    fn write_to(
        &self,
        fs: &dyn FileSystem,
        url: &Path,
        operation: SaveOperation,
    ) -> StorageResult<()> {
        let exists = fs.exists(url);
        match operation {
            SaveOperation::ForCreating if exists => {
                return Err(StorageError::AlreadyExists(url.display().to_string()));
            }
            SaveOperation::ForOverwriting if !exists => {
                return Err(StorageError::NotFound(url.display().to_string()));
            }
            _ => {}
        }
        let bytes = self.contents()?;
        fs.write(url, &bytes)
    }

    /// Record a change so the next autosave tick persists the document.
    pub fn update_change_count(&mut self, change: ChangeKind) {
        match change {
            ChangeKind::Done | ChangeKind::Redone => self.change_count += 1,
            ChangeKind::Undone => self.change_count = self.change_count.saturating_sub(1),
            ChangeKind::Cleared => self.change_count = 0,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.change_count > 0
    }

    /// Persist pending changes to the document's own file.
    /// Does nothing, and does not call `completion`, when nothing changed.
    pub fn autosave_if_needed(&mut self, fs: &dyn FileSystem, completion: impl FnOnce(bool)) {
        if !self.is_open() && self.state != DocumentState::SavingError {
            return;
        }
        if !self.has_unsaved_changes() {
            return;
        }
        let url = self.file_url.clone();
        self.save(fs, &url, SaveOperation::ForOverwriting, completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::Stroke;
    use crate::storage::MemoryFileSystem;
    use kurbo::Point;

    fn fs_with_dir() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(Path::new("/docs")).unwrap();
        fs
    }

    fn sample_entity() -> NoteEntity {
        let mut entity = NoteEntity::new(Drawing::from_strokes(vec![Stroke::from_points([
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
        ])]));
        entity.updated_date = 42;
        entity
    }

    #[test]
    fn test_save_then_open() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");
        let mut doc = NoteDocument::new(url.clone(), sample_entity());

        let mut saved = false;
        doc.save(&fs, &url, SaveOperation::ForCreating, |ok| saved = ok);
        assert!(saved);

        let mut reopened = NoteDocument::new(url, NoteEntity::default());
        let mut opened = false;
        reopened.open(&fs, |ok| opened = ok);
        assert!(opened);
        assert!(reopened.is_open());
        assert_eq!(reopened.entity, doc.entity);
    }

    #[test]
    fn test_saving_unchanged_document_is_byte_identical() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");
        let mut doc = NoteDocument::new(url.clone(), sample_entity());

        doc.save(&fs, &url, SaveOperation::ForCreating, |_| {});
        let first = fs.read(&url).unwrap();
        doc.save(&fs, &url, SaveOperation::ForOverwriting, |_| {});
        let second = fs.read(&url).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_create_fails_when_file_exists() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");
        fs.write(&url, b"old").unwrap();

        let mut doc = NoteDocument::new(url.clone(), sample_entity());
        let mut saved = true;
        doc.save(&fs, &url, SaveOperation::ForCreating, |ok| saved = ok);

        assert!(!saved);
        assert_eq!(fs.read(&url).unwrap(), b"old");
    }

    #[test]
    fn test_overwrite_fails_when_file_missing() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");

        let mut doc = NoteDocument::new(url.clone(), sample_entity());
        let mut saved = true;
        doc.save(&fs, &url, SaveOperation::ForOverwriting, |ok| saved = ok);

        assert!(!saved);
        assert!(!fs.exists(&url));
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");
        fs.write(&url, b"not json").unwrap();

        let mut doc = NoteDocument::new(url, NoteEntity::default());
        let mut opened = true;
        doc.open(&fs, |ok| opened = ok);

        assert!(!opened);
        assert_eq!(doc.state(), DocumentState::Closed);
    }

    #[test]
    fn test_autosave_only_when_changed() {
        let fs = fs_with_dir();
        let url = PathBuf::from("/docs/a.drawing");
        let mut doc = NoteDocument::new(url.clone(), sample_entity());
        doc.save(&fs, &url, SaveOperation::ForCreating, |_| {});
        doc.open(&fs, |_| {});

        let mut called = false;
        doc.autosave_if_needed(&fs, |_| called = true);
        assert!(!called);

        doc.entity.drawing = Drawing::new();
        doc.update_change_count(ChangeKind::Done);
        assert!(doc.has_unsaved_changes());

        let mut saved = false;
        doc.autosave_if_needed(&fs, |ok| saved = ok);
        assert!(saved);
        assert!(!doc.has_unsaved_changes());

        let mut reloaded = NoteDocument::new(url, NoteEntity::default());
        reloaded.open(&fs, |_| {});
        assert!(reloaded.entity.drawing.is_empty());
    }

    #[test]
    fn test_change_count_follows_undo_and_redo() {
        let mut doc = NoteDocument::new(PathBuf::from("/docs/a.drawing"), sample_entity());

        doc.update_change_count(ChangeKind::Done);
        doc.update_change_count(ChangeKind::Undone);
        assert!(!doc.has_unsaved_changes());

        // Undo past the last save stays at zero
        doc.update_change_count(ChangeKind::Undone);
        doc.update_change_count(ChangeKind::Redone);
        assert!(doc.has_unsaved_changes());

        doc.update_change_count(ChangeKind::Done);
        doc.update_change_count(ChangeKind::Cleared);
        assert!(!doc.has_unsaved_changes());
    }
}
