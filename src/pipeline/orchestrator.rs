//! Batch mosaic generation over a whole dataset
//!
//! The dataset is joined, optionally shuffled and partitioned into groups of
//! `nrow * ncol` images. Each group becomes one tile job on the worker pool.
//! Results come back in group order, so the emitted image and annotation ids
//! depend only on the (possibly shuffled) input order, never on scheduling.

use crate::dataset::grouping::{attach_annotations, partition, shuffle_entries};
use crate::dataset::{AnnotationRecord, CocoDataset, ImageRecord, TileGroup};
use crate::geometry::bbox::round_decimals;
use crate::io::configuration::{
    BOX_DECIMALS, DEFAULT_NCOL, DEFAULT_NROW, DEFAULT_NUM_PROC, PROVENANCE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::pipeline::job::{JobContext, TileJob, TileResult};
use crate::pipeline::pool::WorkerPool;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Parameters controlling grouping and scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Grid rows per mosaic
    pub nrow: usize,
    /// Grid columns per mosaic
    pub ncol: usize,
    /// Shuffle image order before grouping
    pub shuffle: bool,
    /// Seed for the shuffle; unseeded when absent
    pub seed: Option<u64>,
    /// Discard an incomplete final group
    pub drop_last: bool,
    /// Number of worker threads
    pub workers: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            nrow: DEFAULT_NROW,
            ncol: DEFAULT_NCOL,
            shuffle: false,
            seed: None,
            drop_last: false,
            workers: DEFAULT_NUM_PROC,
        }
    }
}

impl MosaicConfig {
    /// Number of source images per mosaic
    pub const fn group_size(&self) -> usize {
        self.nrow * self.ncol
    }

    /// Check grid dimensions and worker count
    ///
    /// # Errors
    ///
    /// Returns an error if any of `nrow`, `ncol` or `workers` is zero
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("nrow", self.nrow),
            ("ncol", self.ncol),
            ("workers", self.workers),
        ] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
        }
        Ok(())
    }
}

/// Drives tile jobs over a dataset and assembles the renumbered result
pub struct BatchOrchestrator {
    config: MosaicConfig,
    pool: WorkerPool,
    progress: Option<ProgressManager>,
}

impl BatchOrchestrator {
    /// Validate the configuration and start the worker pool
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool cannot start
    pub fn new(config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.workers)?;
        Ok(Self {
            config,
            pool,
            progress: None,
        })
    }

    /// Report finished tiles on the given progress manager
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Active configuration
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Attached progress manager, if any
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress.as_ref()
    }

    /// Join, shuffle and partition a dataset into numbered tile groups
    ///
    /// # Errors
    ///
    /// Returns an error if the group size is zero
    pub fn plan(
        &self,
        images: Vec<ImageRecord>,
        annotations: Vec<AnnotationRecord>,
    ) -> Result<Vec<TileGroup>> {
        let mut entries = attach_annotations(images, annotations);
        if self.config.shuffle {
            shuffle_entries(&mut entries, self.config.seed);
        }
        partition(entries, self.config.group_size(), self.config.drop_last)
    }

    /// Generate every mosaic of `dataset` and return the new dataset
    ///
    /// Mosaics are written to `output_image_dir`; source files are resolved
    /// under `img_dir`.
    ///
    /// # Errors
    ///
    /// Returns the error of any failing tile job; no dataset is produced then
    pub fn run(
        &mut self,
        dataset: CocoDataset,
        img_dir: &Path,
        output_image_dir: &Path,
    ) -> Result<CocoDataset> {
        let CocoDataset {
            images,
            annotations,
            categories,
            ..
        } = dataset;
        let source_count = images.len();

        let groups = self.plan(images, annotations)?;
        info!(
            sources = source_count,
            groups = groups.len(),
            nrow = self.config.nrow,
            ncol = self.config.ncol,
            workers = self.pool.workers(),
            "formed tile groups"
        );

        let context = JobContext {
            img_dir: img_dir.to_path_buf(),
            output_image_dir: output_image_dir.to_path_buf(),
            nrow: self.config.nrow,
            ncol: self.config.ncol,
        };

        if let Some(ref mut pm) = self.progress {
            pm.initialize(groups.len());
        }
        let progress = self.progress.as_ref();

        let results = self.pool.map_ordered(&groups, |group| {
            let result = TileJob::new(group, &context).run()?;
            if let Some(pm) = progress {
                pm.tile_completed();
            }
            Ok(result)
        })?;

        if let Some(pm) = progress {
            pm.finish();
        }

        let output = renumber(results, categories)?;
        info!(
            images = output.images.len(),
            annotations = output.annotations.len(),
            "composed mosaics"
        );
        Ok(output)
    }
}

/// Flatten tile results into a dataset with dense ids starting at 1
///
/// # Errors
///
/// Returns an error if a result's boxes, category ids and crowd flags differ
/// in count
pub fn renumber(results: Vec<TileResult>, categories: Vec<Value>) -> Result<CocoDataset> {
    let mut images = Vec::with_capacity(results.len());
    let mut annotations: Vec<AnnotationRecord> = Vec::new();

    for (position, result) in results.into_iter().enumerate() {
        let TileResult {
            mut record,
            boxes,
            category_ids,
            iscrowds,
        } = result;

        if boxes.len() != category_ids.len() || boxes.len() != iscrowds.len() {
            return Err(invalid_parameter(
                "annotations",
                &format!(
                    "{} boxes, {} category ids, {} crowd flags",
                    boxes.len(),
                    category_ids.len(),
                    iscrowds.len()
                ),
                &format!("counts for tile {} must agree", record.id),
            ));
        }

        record.id = position as u64 + 1;
        for ((bbox, category_id), iscrowd) in boxes.into_iter().zip(category_ids).zip(iscrowds) {
            annotations.push(AnnotationRecord {
                id: annotations.len() as u64 + 1,
                image_id: record.id,
                area: round_decimals(bbox.area(), BOX_DECIMALS),
                bbox,
                segmentation: Value::Array(Vec::new()),
                category_id,
                iscrowd,
            });
        }
        images.push(record);
    }

    Ok(CocoDataset {
        info: Value::String(PROVENANCE.to_string()),
        images,
        annotations,
        categories,
    })
}
