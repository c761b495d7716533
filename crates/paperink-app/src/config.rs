//! Application configuration.
//!
//! Read from `config.json` in the platform config directory, then
//! overridden by `PAPERINK_*` environment variables.

use crate::error::{AppError, AppResult};
use kurbo::Size;
use paperink_core::storage::{NoCloud, StaticCloudAccount};
use paperink_core::{CloudAccount, PencilTapAction, StorageResolver};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_DOCUMENTS_DIR: &str = "PAPERINK_DOCUMENTS_DIR";
pub const ENV_CLOUD_CONTAINER: &str = "PAPERINK_CLOUD_CONTAINER";
pub const ENV_CLOUD_TOKEN: &str = "PAPERINK_CLOUD_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Local documents directory. Platform default when unset.
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,

    /// Mounted cloud container root.
    #[serde(default)]
    pub cloud_container: Option<PathBuf>,

    /// Cloud identity token. Cloud sync is off without one.
    #[serde(default)]
    pub cloud_token: Option<String>,

    /// What a pencil double-tap does, as set in the system settings.
    #[serde(default)]
    pub pencil_tap_action: PencilTapAction,

    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_width() -> f64 {
    1024.0
}

fn default_height() -> f64 {
    768.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            documents_dir: None,
            cloud_container: None,
            cloud_token: None,
            pencil_tap_action: PencilTapAction::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paperink").join(CONFIG_FILE_NAME))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| AppError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Default file plus environment overrides.
    pub fn load() -> AppResult<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup such as `std::env::var`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DOCUMENTS_DIR) {
            self.documents_dir = Some(PathBuf::from(dir));
        }
        if let Some(container) = lookup(ENV_CLOUD_CONTAINER) {
            self.cloud_container = Some(PathBuf::from(container));
        }
        if let Some(token) = lookup(ENV_CLOUD_TOKEN) {
            self.cloud_token = Some(token).filter(|t| !t.is_empty());
        }
    }

    pub fn frame_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn cloud_account(&self) -> Arc<dyn CloudAccount> {
        if self.cloud_token.is_none() && self.cloud_container.is_none() {
            return Arc::new(NoCloud);
        }
        Arc::new(StaticCloudAccount::new(
            self.cloud_token.clone(),
            self.cloud_container.clone(),
        ))
    }

    pub fn resolver(&self) -> AppResult<StorageResolver> {
        let cloud = self.cloud_account();
        match &self.documents_dir {
            Some(dir) => Ok(StorageResolver::new(dir.clone(), cloud)),
            None => Ok(StorageResolver::default_location(cloud)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperink_core::StorageLocation;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(AppConfig::load_from(&path), Err(AppError::Config { .. })));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"pencil_tap_action": "SwitchEraser", "width": 800}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.pencil_tap_action, PencilTapAction::SwitchEraser);
        assert_eq!(config.frame_size(), Size::new(800.0, 768.0));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DOCUMENTS_DIR, "/tmp/docs"),
            (ENV_CLOUD_CONTAINER, "/tmp/cloud"),
            (ENV_CLOUD_TOKEN, "abc"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        let resolver = config.resolver().unwrap();
        assert_eq!(resolver.location(), StorageLocation::Cloud);
        assert_eq!(
            resolver.save_url(),
            PathBuf::from("/tmp/cloud/Documents/drawings.plist")
        );
    }

    #[test]
    fn test_empty_token_disables_cloud() {
        let mut config = AppConfig {
            documents_dir: Some(PathBuf::from("/tmp/docs")),
            ..AppConfig::default()
        };
        config.apply_overrides(|key| (key == ENV_CLOUD_TOKEN).then(String::new));

        assert_eq!(config.resolver().unwrap().location(), StorageLocation::Local);
    }
}
