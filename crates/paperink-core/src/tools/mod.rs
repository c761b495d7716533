//! Drawing tools and the floating tool picker.

use crate::drawing::{Ink, SerializableColor};
use serde::{Deserialize, Serialize};

/// Ink types offered by the tool picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InkKind {
    #[default]
    Pen,
    Pencil,
    Marker,
    Monoline,
    FountainPen,
    Watercolor,
    Crayon,
}

/// Eraser behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EraserKind {
    /// Removes whole strokes.
    #[default]
    Vector,
    /// Removes the pixels under the eraser.
    Bitmap,
}

/// A tool selectable in the tool picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tool {
    Inking {
        kind: InkKind,
        color: SerializableColor,
        width: f64,
    },
    Eraser(EraserKind),
    Lasso,
}

impl Default for Tool {
    /// Black pen, width 1.
    fn default() -> Self {
        Tool::Inking {
            kind: InkKind::Pen,
            color: SerializableColor::black(),
            width: 1.0,
        }
    }
}

impl Tool {
    pub fn inking(kind: InkKind, color: SerializableColor, width: f64) -> Self {
        Tool::Inking { kind, color, width }
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self, Tool::Eraser(_))
    }

    /// Ink produced by this tool, if it draws.
    pub fn ink(&self) -> Option<Ink> {
        match *self {
            Tool::Inking { kind, color, width } => Some(Ink { kind, color, width }),
            Tool::Eraser(_) | Tool::Lasso => None,
        }
    }
}

/// Notifications emitted by the tool picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPickerEvent {
    SelectedToolChanged,
    VisibilityChanged,
}

/// The floating tool palette.
///
/// The picker does not call its observers directly; it queues events that
/// the owner drains with [`ToolPicker::take_events`] and routes.
#[derive(Debug, Clone)]
pub struct ToolPicker {
    selected_tool: Tool,
    is_visible: bool,
    /// Whether the "draw with finger" policy toggle is shown.
    pub shows_drawing_policy_controls: bool,
    observer_count: usize,
    events: Vec<ToolPickerEvent>,
}

impl Default for ToolPicker {
    fn default() -> Self {
        Self {
            selected_tool: Tool::default(),
            is_visible: false,
            shows_drawing_policy_controls: true,
            observer_count: 0,
            events: Vec::new(),
        }
    }
}

impl ToolPicker {
    /// Create a hidden tool picker with the default tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Events are only queued while someone observes.
    pub fn add_observer(&mut self) {
        self.observer_count += 1;
    }

    pub fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    pub fn set_selected_tool(&mut self, tool: Tool) {
        self.selected_tool = tool;
        self.notify(ToolPickerEvent::SelectedToolChanged);
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.is_visible == visible {
            return;
        }
        self.is_visible = visible;
        self.notify(ToolPickerEvent::VisibilityChanged);
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<ToolPickerEvent> {
        std::mem::take(&mut self.events)
    }

    fn notify(&mut self, event: ToolPickerEvent) {
        if self.observer_count > 0 {
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_black_pen() {
        let picker = ToolPicker::new();
        let ink = picker.selected_tool().ink().unwrap();

        assert_eq!(ink.kind, InkKind::Pen);
        assert_eq!(ink.color, SerializableColor::black());
        assert!((ink.width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_events_only_with_observers() {
        let mut picker = ToolPicker::new();
        picker.set_selected_tool(Tool::Lasso);
        assert!(picker.take_events().is_empty());

        picker.add_observer();
        picker.set_selected_tool(Tool::Eraser(EraserKind::Vector));
        assert_eq!(picker.take_events(), vec![ToolPickerEvent::SelectedToolChanged]);
        assert!(picker.take_events().is_empty());
    }

    #[test]
    fn test_visibility_change_is_reported_once() {
        let mut picker = ToolPicker::new();
        picker.add_observer();

        picker.set_visible(true);
        picker.set_visible(true);
        assert_eq!(picker.take_events(), vec![ToolPickerEvent::VisibilityChanged]);
    }

    #[test]
    fn test_eraser_has_no_ink() {
        assert!(Tool::Eraser(EraserKind::Bitmap).ink().is_none());
        assert!(Tool::Eraser(EraserKind::Bitmap).is_eraser());
        assert!(!Tool::default().is_eraser());
    }
}
