//! Startup owner of the single current-format document.
//!
//! Resolves where the document lives, migrates the v1.x file once, creates
//! an empty document on a fresh install and opens it. Every persistence
//! failure is logged and otherwise ignored.

use crate::document::{ChangeKind, NoteDocument, NoteEntity, SaveOperation};
use crate::drawing::Drawing;
use crate::storage::migration::LegacyDataModel;
use crate::storage::{FileSystem, StorageResolver};
use std::path::Path;
use std::sync::Arc;

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "failure" }
}

pub struct DocumentManager<F: FileSystem> {
    fs: Arc<F>,
    resolver: StorageResolver,
    document: NoteDocument,
    did_document_open: bool,
}

impl<F: FileSystem> DocumentManager<F> {
    /// Run the startup sequence: migrate, create if absent, open.
    pub fn new(resolver: StorageResolver, fs: Arc<F>) -> Self {
        let save_url = resolver.save_url();
        log::info!(
            "Document location: {:?} ({})",
            resolver.location(),
            save_url.display()
        );

        let mut manager = Self {
            fs,
            resolver,
            document: NoteDocument::new(save_url.clone(), NoteEntity::default()),
            did_document_open: false,
        };

        manager.migrate_file_if_needed();

        // Fresh install
        if !manager.fs.exists(&save_url) {
            manager.document.entity = NoteEntity::default();
            manager.ensure_parent_dir(&save_url);
            manager
                .document
                .save(&*manager.fs, &save_url, SaveOperation::ForCreating, |success| {
                    log::info!("new document create: {}", outcome(success));
                });
        }

        let mut opened = false;
        manager.document.open(&*manager.fs, |success| {
            opened = success;
            log::info!("open {}", outcome(success));
        });
        manager.did_document_open = opened;
        manager
    }

    fn ensure_parent_dir(&self, url: &Path) {
        if let Some(parent) = url.parent() {
            if let Err(e) = self.fs.create_dir_all(parent) {
                log::error!("Could not create {}: {}", parent.display(), e);
            }
        }
    }

    /// Convert the v1.x file if it exists and the current file does not.
    fn migrate_file_if_needed(&mut self) {
        let legacy_url = self.resolver.legacy_url();
        let save_url = self.resolver.save_url();
        if !self.fs.exists(&legacy_url) || self.fs.exists(&save_url) {
            return;
        }
        log::info!("Migrating {} to {}", legacy_url.display(), save_url.display());

        let drawing = match self
            .fs
            .read(&legacy_url)
            .and_then(|bytes| LegacyDataModel::from_bytes(&bytes))
        {
            Ok(model) => model.into_drawing(),
            Err(e) => {
                log::warn!("Could not read legacy file, starting empty: {}", e);
                Drawing::new()
            }
        };

        let renamed_url = self.resolver.renamed_legacy_url();
        if let Err(e) = self.fs.move_item(&legacy_url, &renamed_url) {
            log::error!("Could not rename legacy file: {}", e);
        }

        self.document.entity = NoteEntity::new(drawing);
        self.ensure_parent_dir(&save_url);
        self.document
            .save(&*self.fs, &save_url, SaveOperation::ForCreating, |success| {
                log::info!("migrate: {}", outcome(success));
            });
    }

    pub fn did_document_open(&self) -> bool {
        self.did_document_open
    }

    pub fn document(&self) -> &NoteDocument {
        &self.document
    }

    pub fn resolver(&self) -> &StorageResolver {
        &self.resolver
    }

    pub fn drawing(&self) -> &Drawing {
        &self.document.entity.drawing
    }

    pub fn set_drawing(&mut self, drawing: Drawing) {
        self.document.entity.drawing = drawing;
    }

    /// Overwrite the current-format file.
    ///
    /// Skipped until the document has been opened, and when the file does
    /// not exist at the current location.
    pub fn save(&mut self) {
        let save_url = self.resolver.save_url();
        if !self.fs.exists(&save_url) || !self.did_document_open {
            return;
        }
        self.document
            .save(&*self.fs, &save_url, SaveOperation::ForOverwriting, |success| {
                log::info!("save: {}", outcome(success));
            });
    }

    /// Mark the document as edited so the next autosave tick writes it.
    pub fn autosave(&mut self) {
        if !self.did_document_open {
            return;
        }
        self.document.update_change_count(ChangeKind::Done);
        log::debug!("autosave");
    }

    /// Autosave tick: write pending changes, if any.
    pub fn flush_autosave(&mut self) {
        self.document.autosave_if_needed(&*self.fs, |success| {
            log::info!("autosave: {}", outcome(success));
        });
    }

    /// Hand the opened document over to its next owner.
    /// `None` if it never opened.
    pub fn into_document(self) -> Option<NoteDocument> {
        self.did_document_open.then_some(self.document)
    }
}
