//! COCO dataset records and their grouping into mosaic tiles

/// Typed COCO records and JSON load/save
pub mod coco;
/// Annotation join, shuffling and partitioning into tile groups
pub mod grouping;

pub use coco::{AnnotationRecord, CocoDataset, ImageRecord};
pub use grouping::{ImageEntry, TileGroup};
