//! Grid mosaic synthesis for object detection datasets
//!
//! Groups of source images are rescaled and tiled into one mosaic per group,
//! row strips first and then a vertical pass over the rows. Every bounding box
//! is carried along so it stays correct in the mosaic's coordinate space, and
//! the resulting images and annotations are renumbered into a fresh dataset.

#![forbid(unsafe_code)]

/// Strip and grid composition with bounding box remapping
pub mod composition;
/// COCO records and grouping of images into tiles
pub mod dataset;
/// Bounding boxes and composition axes
pub mod geometry;
/// Input/output operations and error handling
pub mod io;
/// Parallel tile jobs and batch orchestration
pub mod pipeline;

pub use io::error::{MosaicError, Result};
