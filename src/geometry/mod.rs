//! Geometric value types shared by composition and dataset handling

/// Composition axis and extent helpers
pub mod axis;
/// Axis-aligned bounding boxes in image coordinates
pub mod bbox;

pub use axis::Axis;
pub use bbox::BBox;
