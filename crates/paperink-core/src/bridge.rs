//! Canvas delegate bridge.
//!
//! One object receives every toolkit callback the canvas screen cares about:
//! tool picker selection, pencil double-tap, drawing changes, zoom target
//! and share sheet metadata. It holds no reference to its owner. Callbacks
//! that need the owner to act return a [`BridgeRequest`] instead.

use crate::canvas::CanvasView;
use crate::drawing::Drawing;
use crate::preferences::UserPreference;
use crate::tools::{EraserKind, Tool, ToolPicker, ToolPickerEvent};
use serde::{Deserialize, Serialize};

/// Title shown in the share sheet preview.
pub const SHARE_TITLE: &str = "Share your note";

/// Fraction of the content size the drawing may reach before it grows.
const GROWTH_THRESHOLD_NUMERATOR: f64 = 9.0;
const GROWTH_THRESHOLD_DENOMINATOR: f64 = 10.0;

/// System-wide action for a pencil double-tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PencilTapAction {
    /// Go back to the previously selected tool.
    #[default]
    SwitchPrevious,
    /// Toggle between the eraser and the previous tool.
    SwitchEraser,
    /// Toggle the surrounding UI.
    ShowColorPalette,
    Ignore,
}

/// Work the bridge asks its owner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    /// Persist this drawing.
    Save(Drawing),
    /// Show or hide everything except the paper.
    ToggleHideExceptPaper,
}

/// View that receives pinch-zoom gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTarget {
    Canvas,
}

/// Metadata for the share sheet preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMetadata {
    pub title: String,
}

/// Share-sheet activity identifier, e.g. `"com.apple.UIKit.activity.Mail"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityType(pub String);

#[derive(Debug)]
pub struct CanvasDelegateBridge {
    tool_picker: ToolPicker,
    default_tool: Tool,
    previous_tool: Tool,
    current_tool: Tool,
}

impl Default for CanvasDelegateBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDelegateBridge {
    /// Create the bridge with its own tool picker, observing it and
    /// selecting the default pen.
    pub fn new() -> Self {
        let default_tool = Tool::default();
        let mut tool_picker = ToolPicker::new();
        tool_picker.add_observer();
        tool_picker.set_selected_tool(default_tool);
        tool_picker.shows_drawing_policy_controls = false;
        // The initial selection is not a user change
        tool_picker.take_events();

        Self {
            tool_picker,
            default_tool,
            previous_tool: default_tool,
            current_tool: default_tool,
        }
    }

    pub fn tool_picker(&self) -> &ToolPicker {
        &self.tool_picker
    }

    pub fn default_tool(&self) -> Tool {
        self.default_tool
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    pub fn previous_tool(&self) -> Tool {
        self.previous_tool
    }

    /// Select a tool in the picker, as the user would.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool_picker.set_selected_tool(tool);
        self.dispatch_tool_picker_events();
    }

    pub fn set_tool_picker_visible(&mut self, visible: bool) {
        self.tool_picker.set_visible(visible);
        self.dispatch_tool_picker_events();
    }

    fn dispatch_tool_picker_events(&mut self) {
        for event in self.tool_picker.take_events() {
            match event {
                ToolPickerEvent::SelectedToolChanged => {
                    self.tool_picker_selected_tool_did_change();
                }
                ToolPickerEvent::VisibilityChanged => {
                    log::debug!("Tool picker visible: {}", self.tool_picker.is_visible());
                }
            }
        }
    }

    /// Tool picker callback: remember where we came from.
    pub fn tool_picker_selected_tool_did_change(&mut self) {
        self.previous_tool = self.current_tool;
        self.current_tool = self.tool_picker.selected_tool();
    }

    /// Pencil double-tap callback.
    ///
    /// Ignored while the tool picker is visible, since the picker handles
    /// the gesture itself then.
    pub fn pencil_interaction_did_tap(&mut self, action: PencilTapAction) -> Option<BridgeRequest> {
        if self.tool_picker.is_visible() {
            return None;
        }
        match action {
            PencilTapAction::SwitchPrevious => {
                self.switch_previous_tool();
                None
            }
            PencilTapAction::SwitchEraser => {
                self.switch_eraser();
                None
            }
            PencilTapAction::ShowColorPalette => Some(BridgeRequest::ToggleHideExceptPaper),
            PencilTapAction::Ignore => None,
        }
    }

    fn switch_previous_tool(&mut self) {
        self.select_tool(self.previous_tool);
    }

    fn switch_eraser(&mut self) {
        if self.current_tool.is_eraser() {
            self.select_tool(self.previous_tool);
        } else {
            self.select_tool(Tool::Eraser(EraserKind::Vector));
        }
    }

    /// Canvas callback: the drawing changed.
    pub fn canvas_view_drawing_did_change(
        &mut self,
        canvas: &mut CanvasView,
        preferences: &UserPreference,
    ) -> Option<BridgeRequest> {
        if preferences.enabled_infinite_scroll {
            update_content_size_if_needed(canvas);
        }

        if !preferences.enabled_auto_save {
            return None;
        }
        Some(BridgeRequest::Save(canvas.drawing().clone()))
    }

    /// Scroll view callback: which view zooms.
    pub fn view_for_zooming(&self) -> ZoomTarget {
        ZoomTarget::Canvas
    }

    /// Share sheet placeholder, used before the user picks an activity.
    pub fn activity_placeholder_item(&self) -> &'static str {
        ""
    }

    /// Share sheet item. Nothing is produced ahead of user action.
    pub fn activity_item(&self, _activity: Option<&ActivityType>) -> Option<String> {
        None
    }

    pub fn activity_link_metadata(&self) -> LinkMetadata {
        LinkMetadata {
            title: SHARE_TITLE.to_string(),
        }
    }
}

/// Grow the content by one frame in each axis the drawing is about to
/// overflow. Content never shrinks.
pub fn update_content_size_if_needed(canvas: &mut CanvasView) {
    let Some(bounds) = canvas.drawing().bounds() else {
        return;
    };
    let content = canvas.content_size();
    let frame = canvas.frame_size();
    let mut grown = content;

    if content.width * GROWTH_THRESHOLD_NUMERATOR / GROWTH_THRESHOLD_DENOMINATOR < bounds.max_x() {
        grown.width += frame.width;
    }
    if content.height * GROWTH_THRESHOLD_NUMERATOR / GROWTH_THRESHOLD_DENOMINATOR < bounds.max_y() {
        grown.height += frame.height;
    }

    if grown != content {
        log::debug!(
            "Content grows from {}x{} to {}x{}",
            content.width,
            content.height,
            grown.width,
            grown.height
        );
        canvas.set_content_size(grown);
    }
}
