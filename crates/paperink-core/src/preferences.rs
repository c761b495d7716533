//! User preferences shared by the canvas and the document layer.

use crate::storage::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the app's config directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    /// Save after every change to the drawing.
    #[serde(default = "default_true")]
    pub enabled_auto_save: bool,

    /// Grow the canvas as the drawing approaches its edge.
    #[serde(default = "default_true")]
    pub enabled_infinite_scroll: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            enabled_auto_save: default_true(),
            enabled_infinite_scroll: default_true(),
        }
    }
}

impl UserPreference {
    /// Default preferences file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paperink").join(PREFERENCES_FILE_NAME))
    }

    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(e) => {
                    log::warn!("Invalid preferences in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load from the default location.
    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_enable_everything() {
        let prefs = UserPreference::default();
        assert!(prefs.enabled_auto_save);
        assert!(prefs.enabled_infinite_scroll);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let prefs = UserPreference::load_from(&dir.path().join("none.json"));
        assert_eq!(prefs, UserPreference::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);
        let prefs = UserPreference {
            enabled_auto_save: false,
            enabled_infinite_scroll: true,
        };

        prefs.save_to(&path).unwrap();
        assert_eq!(UserPreference::load_from(&path), prefs);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, r#"{"enabled_infinite_scroll": false}"#).unwrap();

        let prefs = UserPreference::load_from(&path);
        assert!(prefs.enabled_auto_save);
        assert!(!prefs.enabled_infinite_scroll);
    }
}
