//! Application shell: startup sequence and event replay.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::event_handler::{EventHandler, HostEvent};
use paperink_core::{
    CanvasViewModel, DocumentManager, FilePaths, FileSystem, LocalFileSystem, UserPreference,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Main application struct.
pub struct App<F: FileSystem = LocalFileSystem> {
    view_model: CanvasViewModel<F>,
    event_handler: EventHandler,
    events_handled: usize,
}

impl App {
    /// Start against the local disk.
    pub fn new(config: AppConfig, preferences: UserPreference) -> AppResult<Self> {
        Self::with_filesystem(config, preferences, Arc::new(LocalFileSystem::new()))
    }
}

impl<F: FileSystem> App<F> {
    /// Run the startup sequence against `fs`.
    ///
    /// Fails only when the note directories cannot be created; every other
    /// persistence problem is logged and startup continues.
    pub fn with_filesystem(
        config: AppConfig,
        preferences: UserPreference,
        fs: Arc<F>,
    ) -> AppResult<Self> {
        let resolver = config.resolver()?;
        fs.create_dir_all(resolver.documents_dir())?;

        let paths = FilePaths::resolve(&resolver, &*fs)?;
        let manager = DocumentManager::new(resolver, fs.clone());
        let document = manager.into_document();

        let frame_size = config.frame_size();
        let view_model = CanvasViewModel::new(fs, paths, preferences, frame_size, document);
        log::info!("Active note: {}", view_model.document().file_url().display());

        Ok(Self {
            event_handler: EventHandler::new(config.pencil_tap_action),
            view_model,
            events_handled: 0,
        })
    }

    pub fn view_model(&self) -> &CanvasViewModel<F> {
        &self.view_model
    }

    pub fn handle_event(&mut self, event: HostEvent) {
        self.event_handler.handle(&mut self.view_model, event);
        self.events_handled += 1;
    }

    /// Feed a recorded session through the event handler.
    pub fn replay(&mut self, events: impl IntoIterator<Item = HostEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// One-line description of the current state.
    pub fn summary(&self) -> String {
        let canvas = self.view_model.canvas_view();
        let content = canvas.content_size();
        format!(
            "{} events, {} strokes, content {}x{}, note {}",
            self.events_handled,
            canvas.drawing().len(),
            content.width,
            content.height,
            self.view_model.document().file_url().display()
        )
    }
}

/// Read a JSON array of host events.
pub fn load_session(path: &Path) -> AppResult<Vec<HostEvent>> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| AppError::Session {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
