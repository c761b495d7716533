//! Scroll and zoom state of the canvas.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom scale the canvas allows.
pub const MIN_ZOOM_SCALE: f64 = 1.0;

/// Largest zoom scale the canvas allows.
pub const MAX_ZOOM_SCALE: f64 = 5.0;

/// Scroll offset and zoom scale of the canvas.
///
/// The offset is measured in content coordinates and is kept inside the
/// scrollable content area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner of the visible area, in content coordinates.
    pub content_offset: Vec2,
    /// Current zoom scale.
    pub zoom_scale: f64,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            content_offset: Vec2::ZERO,
            zoom_scale: 1.0,
            min_zoom_scale: MIN_ZOOM_SCALE,
            max_zoom_scale: MAX_ZOOM_SCALE,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom_scale) * Affine::translate(-self.content_offset)
    }

    /// Convert a screen point to content coordinates.
    pub fn screen_to_content(&self, screen_point: Point) -> Point {
        self.transform().inverse() * screen_point
    }

    /// Convert a content point to screen coordinates.
    pub fn content_to_screen(&self, content_point: Point) -> Point {
        self.transform() * content_point
    }

    /// Scroll by a delta in screen coordinates, staying inside the content.
    pub fn scroll_by(&mut self, delta: Vec2, content_size: Size, frame_size: Size) {
        self.content_offset += delta / self.zoom_scale;
        self.clamp_offset(content_size, frame_size);
    }

    /// Zoom keeping the given screen point fixed. Returns true if the scale
    /// actually changed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let new_scale = (self.zoom_scale * factor).clamp(self.min_zoom_scale, self.max_zoom_scale);
        if (new_scale - self.zoom_scale).abs() < f64::EPSILON {
            return false;
        }

        let anchor = self.screen_to_content(screen_point);
        self.zoom_scale = new_scale;
        let moved = self.content_to_screen(anchor);
        self.content_offset += (moved - screen_point) / self.zoom_scale;
        true
    }

    /// Keep the visible area inside the content.
    pub fn clamp_offset(&mut self, content_size: Size, frame_size: Size) {
        let visible_w = frame_size.width / self.zoom_scale;
        let visible_h = frame_size.height / self.zoom_scale;
        let max_x = (content_size.width - visible_w).max(0.0);
        let max_y = (content_size.height - visible_h).max(0.0);
        self.content_offset.x = self.content_offset.x.clamp(0.0, max_x);
        self.content_offset.y = self.content_offset.y.clamp(0.0, max_y);
    }

    /// Back to the top-left corner at 100%.
    pub fn reset(&mut self) {
        self.content_offset = Vec2::ZERO;
        self.zoom_scale = 1.0;
    }
}
