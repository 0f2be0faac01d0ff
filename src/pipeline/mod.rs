//! Parallel mosaic generation over a dataset
//!
//! This module contains the batch machinery:
//! - Tile jobs composing one group of images each
//! - A worker pool returning results in submission order
//! - The orchestrator grouping a dataset and renumbering the results

/// Single tile job
pub mod job;
/// Batch orchestration and renumbering
pub mod orchestrator;
/// Ordered worker pool
pub mod pool;

pub use job::{JobContext, TileJob, TileResult};
pub use orchestrator::{BatchOrchestrator, MosaicConfig};
pub use pool::WorkerPool;
