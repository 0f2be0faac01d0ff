//! Strip and grid composition of images with their bounding boxes

/// Full grid synthesis from row strips
pub mod grid;
/// Single row or column composition
pub mod strip;

pub use grid::synthesize;
pub use strip::compose_strip;
