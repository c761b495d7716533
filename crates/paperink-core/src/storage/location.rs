//! Storage location resolution.
//!
//! Decides whether the active document lives in the cloud container or in
//! the local documents directory. The decision is never cached: cloud sync
//! can be switched on or off while the app runs, so every accessor asks the
//! [`CloudAccount`] again.

use super::{FileSystem, StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Single-file format written by versions 1.0.0 to 1.2.0.
pub const LEGACY_FILE_NAME: &str = "Like_a_Paper.data";

/// Name the legacy file is kept under after migration.
pub const RENAMED_LEGACY_FILE_NAME: &str = "Like_Paper_v1format.plist";

/// Current-format document name, identical for both locations.
pub const CURRENT_FILE_NAME: &str = "drawings.plist";

/// Subdirectory of the cloud container that is visible to the user.
pub const CLOUD_DOCUMENTS_DIR_NAME: &str = "Documents";

pub const INBOX_DIR_NAME: &str = "Inbox";
pub const ARCHIVED_DIR_NAME: &str = "Archived";

/// Extension of per-note files in the inbox and archive.
pub const NOTE_FILE_EXTENSION: &str = "drawing";

/// Where the active document is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLocation {
    Local,
    Cloud,
}

impl StorageLocation {
    /// Derive the location from the cloud-sync flag.
    pub fn from_cloud_enabled(enabled: bool) -> Self {
        if enabled {
            StorageLocation::Cloud
        } else {
            StorageLocation::Local
        }
    }
}

/// The host account's cloud-sync state.
pub trait CloudAccount: Send + Sync {
    /// Opaque identity token. `Some` means cloud sync is enabled.
    fn identity_token(&self) -> Option<String>;

    /// Root of the app's cloud container, if the host can locate it.
    fn container_url(&self) -> Option<PathBuf>;
}

/// Account without cloud sync.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCloud;

impl CloudAccount for NoCloud {
    fn identity_token(&self) -> Option<String> {
        None
    }

    fn container_url(&self) -> Option<PathBuf> {
        None
    }
}

/// Cloud account with a fixed token and container, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCloudAccount {
    token: Option<String>,
    container: Option<PathBuf>,
}

impl StaticCloudAccount {
    pub fn new(token: Option<String>, container: Option<PathBuf>) -> Self {
        Self { token, container }
    }
}

impl CloudAccount for StaticCloudAccount {
    fn identity_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn container_url(&self) -> Option<PathBuf> {
        self.container.clone()
    }
}

/// Resolves the fixed document paths for this install.
#[derive(Clone)]
pub struct StorageResolver {
    /// Local documents directory.
    documents_dir: PathBuf,
    /// Host cloud account, queried on every access.
    cloud: Arc<dyn CloudAccount>,
}

impl std::fmt::Debug for StorageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageResolver")
            .field("documents_dir", &self.documents_dir)
            .field("location", &self.location())
            .finish()
    }
}

impl StorageResolver {
    /// Create a resolver rooted at the given local documents directory.
    pub fn new(documents_dir: PathBuf, cloud: Arc<dyn CloudAccount>) -> Self {
        Self {
            documents_dir,
            cloud,
        }
    }

    /// Create a resolver in the platform documents directory.
    ///
    /// On Linux: `~/Documents/PaperInk/`
    /// On macOS: `~/Documents/PaperInk/`
    /// On Windows: `{FOLDERID_Documents}\PaperInk\`
    pub fn default_location(cloud: Arc<dyn CloudAccount>) -> StorageResult<Self> {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                StorageError::Unavailable("Could not determine documents directory".to_string())
            })?;
        Ok(Self::new(base.join("PaperInk"), cloud))
    }

    /// Local documents directory.
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Whether cloud sync is currently enabled on the host account.
    pub fn is_cloud_enabled(&self) -> bool {
        self.cloud.identity_token().is_some()
    }

    /// Current storage location.
    pub fn location(&self) -> StorageLocation {
        StorageLocation::from_cloud_enabled(self.is_cloud_enabled())
    }

    /// Path of the v1.x legacy file.
    pub fn legacy_url(&self) -> PathBuf {
        self.documents_dir.join(LEGACY_FILE_NAME)
    }

    /// Path the legacy file is moved to after migration.
    pub fn renamed_legacy_url(&self) -> PathBuf {
        self.documents_dir.join(RENAMED_LEGACY_FILE_NAME)
    }

    /// Current-format path on the device.
    pub fn device_url(&self) -> PathBuf {
        self.documents_dir.join(CURRENT_FILE_NAME)
    }

    /// User-visible directory inside the cloud container.
    pub fn cloud_documents_dir(&self) -> Option<PathBuf> {
        self.cloud
            .container_url()
            .map(|container| container.join(CLOUD_DOCUMENTS_DIR_NAME))
    }

    /// Current-format path in the cloud container.
    pub fn cloud_url(&self) -> Option<PathBuf> {
        self.cloud_documents_dir()
            .map(|dir| dir.join(CURRENT_FILE_NAME))
    }

    /// Directory that holds documents for the given location.
    ///
    /// A cloud location whose container cannot be found falls back to the
    /// local documents directory.
    pub fn root_for(&self, location: StorageLocation) -> PathBuf {
        match location {
            StorageLocation::Local => self.documents_dir.clone(),
            StorageLocation::Cloud => self.cloud_documents_dir().unwrap_or_else(|| {
                log::warn!("Cloud container unavailable, using local storage");
                self.documents_dir.clone()
            }),
        }
    }

    /// Current-format path for the given location.
    pub fn url_for(&self, location: StorageLocation) -> PathBuf {
        self.root_for(location).join(CURRENT_FILE_NAME)
    }

    /// Current-format path for the active location.
    pub fn save_url(&self) -> PathBuf {
        self.url_for(self.location())
    }

    /// Document directory for the active location.
    pub fn root_dir(&self) -> PathBuf {
        self.root_for(self.location())
    }
}

/// Inbox and archive directories for per-note files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePaths {
    inbox: PathBuf,
    archived: PathBuf,
}

impl FilePaths {
    /// Resolve and create the inbox and archive directories.
    ///
    /// This is a startup precondition: without an inbox the app cannot
    /// create documents, so the caller is expected to abort on error.
    pub fn resolve(resolver: &StorageResolver, fs: &dyn FileSystem) -> StorageResult<Self> {
        let root = resolver.root_dir();
        let paths = Self {
            inbox: root.join(INBOX_DIR_NAME),
            archived: root.join(ARCHIVED_DIR_NAME),
        };

        for dir in [&paths.inbox, &paths.archived] {
            fs.create_dir_all(dir).map_err(|e| {
                StorageError::Unavailable(format!("{}: {}", dir.display(), e))
            })?;
        }
        log::debug!("Inbox at {}", paths.inbox.display());
        Ok(paths)
    }

    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    pub fn archived(&self) -> &Path {
        &self.archived
    }

    /// Fresh file name for a new note.
    pub fn new_file_name() -> String {
        format!("{}.{}", Uuid::new_v4(), NOTE_FILE_EXTENSION)
    }

    /// Path in the archive that a note at `note` is moved to.
    pub fn archived_url_for(&self, note: &Path) -> Option<PathBuf> {
        note.file_name().map(|name| self.archived.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileSystem;

    fn cloud(container: &str) -> Arc<dyn CloudAccount> {
        Arc::new(StaticCloudAccount::new(
            Some("token".to_string()),
            Some(PathBuf::from(container)),
        ))
    }

    #[test]
    fn test_local_when_cloud_disabled() {
        let resolver = StorageResolver::new(PathBuf::from("/docs"), Arc::new(NoCloud));

        assert_eq!(resolver.location(), StorageLocation::Local);
        assert_eq!(resolver.save_url(), PathBuf::from("/docs/drawings.plist"));
    }

    #[test]
    fn test_cloud_when_token_present() {
        let resolver = StorageResolver::new(PathBuf::from("/docs"), cloud("/cloud"));

        assert_eq!(resolver.location(), StorageLocation::Cloud);
        assert_eq!(
            resolver.save_url(),
            PathBuf::from("/cloud/Documents/drawings.plist")
        );
    }

    #[test]
    fn test_cloud_without_container_falls_back_to_local() {
        let account = StaticCloudAccount::new(Some("token".to_string()), None);
        let resolver = StorageResolver::new(PathBuf::from("/docs"), Arc::new(account));

        assert_eq!(resolver.location(), StorageLocation::Cloud);
        assert_eq!(resolver.save_url(), PathBuf::from("/docs/drawings.plist"));
    }

    #[test]
    fn test_legacy_paths_are_always_local() {
        let resolver = StorageResolver::new(PathBuf::from("/docs"), cloud("/cloud"));

        assert_eq!(resolver.legacy_url(), PathBuf::from("/docs/Like_a_Paper.data"));
        assert_eq!(
            resolver.renamed_legacy_url(),
            PathBuf::from("/docs/Like_Paper_v1format.plist")
        );
    }

    #[test]
    fn test_file_paths_created() {
        let fs = MemoryFileSystem::new();
        let resolver = StorageResolver::new(PathBuf::from("/docs"), Arc::new(NoCloud));

        let paths = FilePaths::resolve(&resolver, &fs).unwrap();
        assert!(fs.exists(paths.inbox()));
        assert!(fs.exists(paths.archived()));
        assert_eq!(paths.inbox(), Path::new("/docs/Inbox"));
    }

    #[test]
    fn test_new_file_names_are_unique() {
        let a = FilePaths::new_file_name();
        let b = FilePaths::new_file_name();

        assert_ne!(a, b);
        assert!(a.ends_with(".drawing"));
    }
}
