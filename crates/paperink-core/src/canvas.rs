//! The drawing canvas: current drawing, active tool and scrollable content.

use crate::camera::Camera;
use crate::drawing::{Drawing, Stroke};
use crate::tools::Tool;
use kurbo::{Point, Size};

/// Notifications the canvas sends to its delegate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// The drawing was edited or replaced.
    DrawingDidChange,
    /// The zoom scale changed.
    DidZoom { scale: f64 },
}

/// A scrollable drawing surface.
///
/// Events are queued only while a delegate is attached, which lets the owner
/// replace the drawing silently by detaching first.
#[derive(Debug, Clone)]
pub struct CanvasView {
    drawing: Drawing,
    tool: Tool,
    /// Size of the visible frame.
    frame_size: Size,
    /// Size of the scrollable content.
    content_size: Size,
    pub camera: Camera,
    delegate_attached: bool,
    events: Vec<CanvasEvent>,
}

impl CanvasView {
    /// Create an empty canvas whose content initially matches its frame.
    pub fn new(frame_size: Size) -> Self {
        Self {
            drawing: Drawing::new(),
            tool: Tool::default(),
            frame_size,
            content_size: frame_size,
            camera: Camera::new(),
            delegate_attached: false,
            events: Vec::new(),
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Replace the whole drawing.
    pub fn set_drawing(&mut self, drawing: Drawing) {
        self.drawing = drawing;
        self.notify(CanvasEvent::DrawingDidChange);
    }

    /// Finish a stroke drawn with the current tool.
    ///
    /// Returns false when the current tool does not produce ink or there
    /// are no points.
    pub fn draw_stroke(&mut self, points: impl IntoIterator<Item = Point>) -> bool {
        let Some(ink) = self.tool.ink() else {
            return false;
        };
        let mut stroke = Stroke::from_points(points);
        if stroke.points.is_empty() {
            return false;
        }
        stroke.ink = ink;
        self.add_stroke(stroke);
        true
    }

    /// Append a finished stroke.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.drawing.push(stroke);
        self.notify(CanvasEvent::DrawingDidChange);
    }

    /// Remove every stroke whose bounds contain the point.
    pub fn erase_at(&mut self, point: Point) -> usize {
        let before = self.drawing.len();
        self.drawing
            .strokes
            .retain(|s| s.bounds().is_none_or(|b| !b.contains(point)));
        let removed = before - self.drawing.len();
        if removed > 0 {
            self.notify(CanvasEvent::DrawingDidChange);
        }
        removed
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    /// Resize the visible frame. The content never becomes smaller than it.
    pub fn set_frame_size(&mut self, frame_size: Size) {
        self.frame_size = frame_size;
        self.content_size = Size::new(
            self.content_size.width.max(frame_size.width),
            self.content_size.height.max(frame_size.height),
        );
        self.camera.clamp_offset(self.content_size, self.frame_size);
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn set_content_size(&mut self, content_size: Size) {
        self.content_size = content_size;
        self.camera.clamp_offset(self.content_size, self.frame_size);
    }

    /// Shrink the content back to the frame and scroll to the origin.
    pub fn reset_viewport(&mut self) {
        self.content_size = self.frame_size;
        self.camera.reset();
    }

    /// Zoom around a screen point.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        if self.camera.zoom_at(screen_point, factor) {
            self.camera.clamp_offset(self.content_size, self.frame_size);
            let scale = self.camera.zoom_scale;
            self.notify(CanvasEvent::DidZoom { scale });
        }
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate_attached
    }

    pub fn attach_delegate(&mut self) {
        self.delegate_attached = true;
    }

    /// Detach the delegate, dropping anything it has not consumed yet.
    pub fn detach_delegate(&mut self) {
        self.delegate_attached = false;
        self.events.clear();
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    fn notify(&mut self, event: CanvasEvent) {
        if self.delegate_attached {
            self.events.push(event);
        }
    }
}
