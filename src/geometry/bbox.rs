//! Axis-aligned bounding box in floating-point image coordinates

use crate::geometry::Axis;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `(x, y, w, h)` relative to its parent image
///
/// Serialized as a four-element array to match the COCO `bbox` field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl BBox {
    /// Create a box from its top-left corner and size
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Scale horizontal components by `sx` and vertical components by `sy`
    #[must_use]
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            w: self.w * sx,
            h: self.h * sy,
        }
    }

    /// Translate the box along the main axis of `axis`
    #[must_use]
    pub fn shifted(self, axis: Axis, offset: f64) -> Self {
        match axis {
            Axis::Horizontal => Self {
                x: self.x + offset,
                ..self
            },
            Axis::Vertical => Self {
                y: self.y + offset,
                ..self
            },
        }
    }

    /// Round every coordinate to `decimals` places
    #[must_use]
    pub fn rounded(self, decimals: i32) -> Self {
        Self {
            x: round_decimals(self.x, decimals),
            y: round_decimals(self.y, decimals),
            w: round_decimals(self.w, decimals),
            h: round_decimals(self.h, decimals),
        }
    }

    /// Box area `w * h`
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Integer corners `(x1, y1, x2, y2)` with each edge rounded independently
    pub fn corners(&self) -> (i64, i64, i64, i64) {
        (
            self.x.round_ties_even() as i64,
            self.y.round_ties_even() as i64,
            (self.x + self.w).round_ties_even() as i64,
            (self.y + self.h).round_ties_even() as i64,
        )
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x, y, w, h]: [f64; 4]) -> Self {
        Self { x, y, w, h }
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x, bbox.y, bbox.w, bbox.h]
    }
}

/// Round to a fixed number of decimals, ties to even
pub fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
