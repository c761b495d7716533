//! Host events and their translation to view model operations.

use crate::shortcuts::ShortcutRegistry;
use kurbo::{Point, Size};
use paperink_core::{CanvasViewModel, FileSystem, PencilTapAction, Tool};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An input from the host platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A finished pencil or finger stroke, in canvas coordinates.
    Stroke { points: Vec<[f64; 2]> },
    SelectTool { tool: Tool },
    /// Pencil double-tap; the action comes from the system settings.
    PencilDoubleTap,
    Zoom { x: f64, y: f64, factor: f64 },
    Resize { width: f64, height: f64 },
    ToolPickerVisible { visible: bool },
    ToggleToolPicker,
    ShowActivityView { visible: bool },
    Share,
    Save,
    Archive,
    NewNote,
    OpenNote { path: PathBuf },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
}

/// Translates host events into view model calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventHandler {
    /// System-wide pencil double-tap preference.
    pub pencil_tap_action: PencilTapAction,
}

impl EventHandler {
    pub fn new(pencil_tap_action: PencilTapAction) -> Self {
        Self { pencil_tap_action }
    }

    pub fn handle<F: FileSystem>(&self, view_model: &mut CanvasViewModel<F>, event: HostEvent) {
        log::trace!("Host event: {:?}", event);
        match event {
            HostEvent::Stroke { points } => {
                view_model.draw_stroke(points.into_iter().map(|[x, y]| Point::new(x, y)));
            }
            HostEvent::SelectTool { tool } => view_model.select_tool(tool),
            HostEvent::PencilDoubleTap => view_model.pencil_double_tap(self.pencil_tap_action),
            HostEvent::Zoom { x, y, factor } => view_model.zoom(Point::new(x, y), factor),
            HostEvent::Resize { width, height } => view_model.resize(Size::new(width, height)),
            HostEvent::ToolPickerVisible { visible } => view_model.set_visible_tool_picker(visible),
            HostEvent::ToggleToolPicker => view_model.toggle_tool_picker(),
            HostEvent::ShowActivityView { visible } => view_model.set_show_activity_view(visible),
            HostEvent::Share => {
                view_model.set_show_activity_view(true);
                log::info!("Share sheet: {}", view_model.share_metadata().title);
            }
            HostEvent::Save => {
                let drawing = view_model.canvas_view().drawing().clone();
                view_model.save(drawing);
            }
            HostEvent::Archive => view_model.archive(),
            HostEvent::NewNote => view_model.create_new_document(),
            HostEvent::OpenNote { path } => view_model.open_document(path),
            HostEvent::Key { key, ctrl, shift } => {
                match ShortcutRegistry::lookup(&key, ctrl, shift) {
                    Some(shortcut) => self.handle(view_model, shortcut.action.to_event()),
                    None => log::debug!("Unbound key {}", key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperink_core::storage::{MemoryFileSystem, NoCloud};
    use paperink_core::{EraserKind, FilePaths, StorageResolver, UserPreference};
    use std::sync::Arc;

    fn view_model() -> (Arc<MemoryFileSystem>, CanvasViewModel<MemoryFileSystem>) {
        let fs = Arc::new(MemoryFileSystem::new());
        let resolver = StorageResolver::new(PathBuf::from("/docs"), Arc::new(NoCloud));
        let paths = FilePaths::resolve(&resolver, &*fs).unwrap();
        let vm = CanvasViewModel::new(
            fs.clone(),
            paths,
            UserPreference::default(),
            Size::new(800.0, 600.0),
            None,
        );
        (fs, vm)
    }

    #[test]
    fn test_events_deserialize() {
        let json = r#"[
            {"type": "stroke", "points": [[1, 2], [3, 4]]},
            {"type": "pencil_double_tap"},
            {"type": "key", "key": "S", "ctrl": true},
            {"type": "open_note", "path": "/docs/Inbox/a.drawing"}
        ]"#;
        let events: Vec<HostEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(events[1], HostEvent::PencilDoubleTap);
        assert_eq!(
            events[2],
            HostEvent::Key {
                key: "S".into(),
                ctrl: true,
                shift: false
            }
        );
    }

    #[test]
    fn test_stroke_event_autosaves() {
        let (fs, mut vm) = view_model();
        let handler = EventHandler::default();

        handler.handle(
            &mut vm,
            HostEvent::Stroke {
                points: vec![[10.0, 10.0], [50.0, 50.0]],
            },
        );

        assert!(fs.exists(vm.document().file_url()));
    }

    #[test]
    fn test_double_tap_uses_configured_action() {
        let (_fs, mut vm) = view_model();
        let handler = EventHandler::new(PencilTapAction::SwitchEraser);

        handler.handle(&mut vm, HostEvent::PencilDoubleTap);
        assert_eq!(vm.canvas_view().tool(), Tool::Eraser(EraserKind::Vector));
    }

    #[test]
    fn test_key_shortcut_dispatches() {
        let (_fs, mut vm) = view_model();
        let handler = EventHandler::default();

        handler.handle(
            &mut vm,
            HostEvent::Key {
                key: "p".into(),
                ctrl: true,
                shift: false,
            },
        );
        assert!(vm.delegate_bridge().tool_picker().is_visible());
    }

    #[test]
    fn test_share_hides_tool_picker() {
        let (_fs, mut vm) = view_model();
        let handler = EventHandler::default();

        handler.handle(&mut vm, HostEvent::ToolPickerVisible { visible: true });
        handler.handle(&mut vm, HostEvent::Share);

        assert!(vm.is_show_activity_view());
        assert!(!vm.delegate_bridge().tool_picker().is_visible());
    }
}
