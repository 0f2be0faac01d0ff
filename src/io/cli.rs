//! Command-line interface for generating a mosaic dataset from a COCO file

use crate::dataset::CocoDataset;
use crate::io::configuration::{
    ANNOTATIONS_FILE_NAME, DEFAULT_DEMO, DEFAULT_IMG_DIR, DEFAULT_NCOL, DEFAULT_NROW,
    DEFAULT_NUM_PROC, DEFAULT_OUTPUT_DIR, DEMO_DIR_NAME, IMAGES_DIR_NAME,
};
use crate::io::error::Result;
use crate::io::paths::{create_fresh_dir, ensure_dir};
use crate::io::progress::ProgressManager;
use crate::io::visualization::render_demo;
use crate::pipeline::{BatchOrchestrator, MosaicConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mosaic-synth")]
#[command(
    author,
    version,
    about = "Compose grid mosaics from a COCO dataset and remap its boxes"
)]
/// Command-line arguments for mosaic generation
pub struct Cli {
    /// COCO annotation file describing the source images
    #[arg(long, value_name = "FILE")]
    pub coco_file: PathBuf,

    /// Directory that source image locators are resolved against
    #[arg(long, default_value = DEFAULT_IMG_DIR)]
    pub img_dir: PathBuf,

    /// Directory receiving images, annotations and demo renderings
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of worker threads
    #[arg(long, default_value_t = DEFAULT_NUM_PROC)]
    pub num_proc: usize,

    /// Grid rows per mosaic
    #[arg(long, default_value_t = DEFAULT_NROW)]
    pub nrow: usize,

    /// Grid columns per mosaic
    #[arg(long, default_value_t = DEFAULT_NCOL)]
    pub ncol: usize,

    /// Shuffle images before grouping
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for reproducible shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Discard a final group smaller than nrow * ncol
    #[arg(long)]
    pub drop_last: bool,

    /// Number of mosaics to render with outlined boxes
    #[arg(long, default_value_t = DEFAULT_DEMO)]
    pub demo: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Orchestration parameters selected on the command line
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            nrow: self.nrow,
            ncol: self.ncol,
            shuffle: self.shuffle,
            seed: self.seed,
            drop_last: self.drop_last,
            workers: self.num_proc,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Directory receiving mosaic images
    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGES_DIR_NAME)
    }

    /// Path of the emitted annotation set
    pub fn annotations_path(&self) -> PathBuf {
        self.output_dir.join(ANNOTATIONS_FILE_NAME)
    }

    /// Directory receiving demo renderings
    pub fn demo_dir(&self) -> PathBuf {
        self.output_dir.join(DEMO_DIR_NAME)
    }
}

/// Runs one complete mosaic generation from parsed arguments
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Generate mosaics, write the annotation set and optional demo images
    ///
    /// Nothing is written to the annotation file unless every mosaic succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The dataset cannot be read
    /// - The images or demo directory already exists
    /// - Any tile job fails
    /// - The annotation set or a demo image cannot be written
    pub fn process(&self) -> Result<CocoDataset> {
        let start_time = Instant::now();
        let mut orchestrator = BatchOrchestrator::new(self.cli.mosaic_config())?;
        if self.cli.should_show_progress() {
            orchestrator = orchestrator.with_progress(ProgressManager::new());
        }

        let dataset = CocoDataset::load(&self.cli.coco_file)?;

        ensure_dir(&self.cli.output_dir)?;
        let images_dir = create_fresh_dir(&self.cli.images_dir())?;

        let output = orchestrator.run(dataset, &self.cli.img_dir, &images_dir)?;
        output.save(&self.cli.annotations_path())?;

        if self.cli.demo > 0 {
            let demo_dir = create_fresh_dir(&self.cli.demo_dir())?;
            render_demo(&output, self.cli.demo, &images_dir, &demo_dir)?;
        }

        info!(
            mosaics = output.images.len(),
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "finished"
        );
        Ok(output)
    }
}
