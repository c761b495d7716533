//! View model for the canvas screen.

use crate::bridge::{BridgeRequest, CanvasDelegateBridge, LinkMetadata, PencilTapAction, ZoomTarget};
use crate::canvas::{CanvasEvent, CanvasView};
use crate::document::{now_millis, NoteDocument, NoteEntity, SaveOperation};
use crate::drawing::Drawing;
use crate::preferences::UserPreference;
use crate::storage::{FilePaths, FileSystem};
use crate::tools::Tool;
use kurbo::{Point, Size};
use std::path::PathBuf;
use std::sync::Arc;

/// Inbox size from which the app may ask for a store review.
pub const REVIEW_REQUEST_THRESHOLD: usize = 5;

/// Owns the canvas, its delegate bridge and the active note.
pub struct CanvasViewModel<F: FileSystem> {
    fs: Arc<F>,
    paths: FilePaths,
    preferences: UserPreference,
    document: NoteDocument,
    canvas_view: CanvasView,
    delegate_bridge: CanvasDelegateBridge,

    /// Hide all chrome except the paper itself.
    pub hide_except_paper: bool,
    pub show_drawing_information: bool,
    pub show_tag_list: bool,
    pub show_unsaved_alert: bool,
    is_show_activity_view: bool,
}

impl<F: FileSystem> CanvasViewModel<F> {
    /// Create the view model. Without a document a new one is created in
    /// the inbox.
    pub fn new(
        fs: Arc<F>,
        paths: FilePaths,
        preferences: UserPreference,
        frame_size: Size,
        note_document: Option<NoteDocument>,
    ) -> Self {
        let document = note_document.unwrap_or_else(|| Self::new_document(&paths));
        let mut canvas_view = CanvasView::new(frame_size);
        canvas_view.set_drawing(document.entity.drawing.clone());

        let delegate_bridge = CanvasDelegateBridge::new();
        canvas_view.set_tool(delegate_bridge.current_tool());
        canvas_view.attach_delegate();

        Self {
            fs,
            paths,
            preferences,
            document,
            canvas_view,
            delegate_bridge,
            hide_except_paper: true,
            show_drawing_information: false,
            show_tag_list: false,
            show_unsaved_alert: false,
            is_show_activity_view: false,
        }
    }

    fn new_document(paths: &FilePaths) -> NoteDocument {
        let url = paths.inbox().join(FilePaths::new_file_name());
        log::debug!("New note at {}", url.display());
        NoteDocument::new(url, NoteEntity::new(Drawing::new()))
    }

    pub fn document(&self) -> &NoteDocument {
        &self.document
    }

    pub fn canvas_view(&self) -> &CanvasView {
        &self.canvas_view
    }

    pub fn delegate_bridge(&self) -> &CanvasDelegateBridge {
        &self.delegate_bridge
    }

    pub fn preferences(&self) -> &UserPreference {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: UserPreference) {
        self.preferences = preferences;
    }

    pub fn paths(&self) -> &FilePaths {
        &self.paths
    }

    /// Replace the active note. `None` starts a new one.
    ///
    /// The canvas delegate is detached during the swap so loading the new
    /// drawing does not look like an edit. Scroll and zoom start over.
    pub fn set_document(&mut self, document: Option<NoteDocument>) {
        let document = document.unwrap_or_else(|| Self::new_document(&self.paths));

        self.canvas_view.detach_delegate();
        self.canvas_view.set_drawing(document.entity.drawing.clone());
        self.canvas_view.reset_viewport();
        self.canvas_view.attach_delegate();
        self.document = document;
    }

    /// Open the note at `url` and make it active. A note that fails to open
    /// leaves the current one in place.
    pub fn open_document(&mut self, url: PathBuf) {
        let mut document = NoteDocument::new(url, NoteEntity::default());
        let mut opened = false;
        document.open(&*self.fs, |success| opened = success);
        if opened {
            self.set_document(Some(document));
        }
    }

    /// Start a fresh note in the inbox.
    pub fn create_new_document(&mut self) {
        self.set_document(None);
    }

    /// Store the drawing in the active note and write it out.
    pub fn save(&mut self, drawing: Drawing) {
        self.document.entity.drawing = drawing;
        self.document.entity.updated_date = now_millis();

        let url = self.document.file_url().to_path_buf();
        let operation = if self.fs.exists(&url) {
            SaveOperation::ForOverwriting
        } else {
            SaveOperation::ForCreating
        };
        self.document.save(&*self.fs, &url, operation, |success| {
            if success {
                log::debug!("Saved {}", url.display());
            }
        });
    }

    /// Move the active note's file into the archive directory and start a
    /// new note in its place.
    pub fn archive(&mut self) {
        let from = self.document.file_url().to_path_buf();
        let Some(to) = self.paths.archived_url_for(&from) else {
            log::error!("Could not archive: {} has no file name", from.display());
            return;
        };
        match self.fs.move_item(&from, &to) {
            Ok(()) => {
                log::info!("Archived {} to {}", from.display(), to.display());
                self.set_document(None);
            }
            Err(e) => log::error!("Could not archive: {}", e),
        }
    }

    pub fn set_visible_tool_picker(&mut self, visible: bool) {
        self.delegate_bridge.set_tool_picker_visible(visible);
    }

    pub fn toggle_tool_picker(&mut self) {
        let visible = self.delegate_bridge.tool_picker().is_visible();
        self.set_visible_tool_picker(!visible);
    }

    pub fn is_show_activity_view(&self) -> bool {
        self.is_show_activity_view
    }

    /// Show or hide the share sheet. The tool picker gets out of the way
    /// while it is shown.
    pub fn set_show_activity_view(&mut self, show: bool) {
        self.is_show_activity_view = show;
        if show {
            self.set_visible_tool_picker(false);
        }
    }

    pub fn share_metadata(&self) -> LinkMetadata {
        self.delegate_bridge.activity_link_metadata()
    }

    /// Whether enough notes have piled up to ask for a review.
    pub fn can_review_request(&self) -> bool {
        self.fs
            .list(self.paths.inbox())
            .map(|files| files.len() >= REVIEW_REQUEST_THRESHOLD)
            .unwrap_or(false)
    }

    /// User drew a stroke on the canvas with the current tool.
    pub fn draw_stroke(&mut self, points: impl IntoIterator<Item = Point>) {
        let tool = self.canvas_view.tool();
        if tool.is_eraser() {
            for point in points {
                self.canvas_view.erase_at(point);
            }
        } else {
            self.canvas_view.draw_stroke(points);
        }
        self.process_canvas_events();
    }

    /// User picked a tool in the tool picker.
    pub fn select_tool(&mut self, tool: Tool) {
        self.delegate_bridge.select_tool(tool);
        self.sync_canvas_tool();
    }

    /// Pencil double-tap with the system's preferred action.
    pub fn pencil_double_tap(&mut self, action: PencilTapAction) {
        let request = self.delegate_bridge.pencil_interaction_did_tap(action);
        self.sync_canvas_tool();
        if let Some(request) = request {
            self.apply(request);
        }
    }

    /// Pinch zoom around a screen point.
    pub fn zoom(&mut self, anchor: Point, factor: f64) {
        match self.delegate_bridge.view_for_zooming() {
            ZoomTarget::Canvas => self.canvas_view.zoom_at(anchor, factor),
        }
        self.process_canvas_events();
    }

    /// The window was resized.
    pub fn resize(&mut self, frame_size: Size) {
        self.canvas_view.set_frame_size(frame_size);
    }

    fn sync_canvas_tool(&mut self) {
        self.canvas_view.set_tool(self.delegate_bridge.current_tool());
    }

    /// Route pending canvas notifications to the bridge.
    fn process_canvas_events(&mut self) {
        for event in self.canvas_view.take_events() {
            match event {
                CanvasEvent::DrawingDidChange => {
                    let request = self
                        .delegate_bridge
                        .canvas_view_drawing_did_change(&mut self.canvas_view, &self.preferences);
                    if let Some(request) = request {
                        self.apply(request);
                    }
                }
                CanvasEvent::DidZoom { scale } => log::debug!("Zoom scale {:.2}", scale),
            }
        }
    }

    fn apply(&mut self, request: BridgeRequest) {
        match request {
            BridgeRequest::Save(drawing) => self.save(drawing),
            BridgeRequest::ToggleHideExceptPaper => {
                self.hide_except_paper = !self.hide_except_paper;
            }
        }
    }
}
