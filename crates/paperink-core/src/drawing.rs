//! Drawing model: an ordered list of ink strokes.

use crate::tools::InkKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

/// Ink a stroke was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ink {
    pub kind: InkKind,
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for Ink {
    fn default() -> Self {
        Self {
            kind: InkKind::Pen,
            color: SerializableColor::black(),
            width: 1.0,
        }
    }
}

/// A sampled point along a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub location: Point,
    /// Pencil force, 1.0 for touch or legacy input.
    #[serde(default = "default_force")]
    pub force: f64,
}

fn default_force() -> f64 {
    1.0
}

impl StrokePoint {
    pub fn new(location: Point, force: f64) -> Self {
        Self { location, force }
    }
}

impl From<Point> for StrokePoint {
    fn from(location: Point) -> Self {
        Self::new(location, default_force())
    }
}

/// A single ink stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub ink: Ink,
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    pub fn new(ink: Ink, points: Vec<StrokePoint>) -> Self {
        Self { ink, points }
    }

    /// Create a stroke with default ink from plain points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(Ink::default(), points.into_iter().map(StrokePoint::from).collect())
    }

    /// Bounding box including half the ink width on each side.
    /// `None` for a stroke without points.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?.location;
        let rect = self
            .points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first, first), |acc, p| {
                acc.union_pt(p.location)
            });
        Some(rect.inflate(self.ink.width / 2.0, self.ink.width / 2.0))
    }
}

/// An ordered collection of strokes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Append a stroke on top of the others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Union of all stroke bounds. `None` when nothing has been drawn.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes
            .iter()
            .filter_map(Stroke::bounds)
            .reduce(|acc, b| acc.union(b))
    }
}
