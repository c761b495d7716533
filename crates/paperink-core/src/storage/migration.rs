//! Reader for the v1.x single-file format.
//!
//! The legacy file is a JSON object holding a list of pages. Each page is a
//! list of strokes and each stroke a list of `[x, y]` pairs; ink and force
//! were not recorded.

use super::{StorageError, StorageResult};
use crate::drawing::{Drawing, Ink, Stroke, StrokePoint};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One stroke in the legacy format.
pub type LegacyStroke = Vec<[f64; 2]>;

/// Root object of the legacy file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDataModel {
    #[serde(default)]
    pub drawings: Vec<Vec<LegacyStroke>>,
}

impl LegacyDataModel {
    pub fn from_bytes(bytes: &[u8]) -> StorageResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| StorageError::Serialization(format!("Invalid legacy file: {}", e)))
    }

    pub fn page_count(&self) -> usize {
        self.drawings.len()
    }

    /// Flatten all pages into one drawing, keeping stroke order.
    pub fn into_drawing(self) -> Drawing {
        let strokes = self
            .drawings
            .into_iter()
            .flatten()
            .filter(|stroke| !stroke.is_empty())
            .map(|stroke| {
                let points = stroke
                    .into_iter()
                    .map(|[x, y]| StrokePoint::from(Point::new(x, y)))
                    .collect();
                Stroke::new(Ink::default(), points)
            })
            .collect();
        Drawing::from_strokes(strokes)
    }
}
