//! One mosaic per tile group: load, compose, write

use crate::composition::synthesize;
use crate::dataset::{ImageRecord, TileGroup};
use crate::geometry::BBox;
use crate::io::configuration::{BOX_DECIMALS, tile_file_name};
use crate::io::error::Result;
use crate::io::image::{Image, decode, encode};
use crate::io::paths::{require_file, resolve_image_path};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shared, read-only inputs of every tile job
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Directory that source image locators are resolved against
    pub img_dir: PathBuf,
    /// Directory receiving composed mosaics
    pub output_image_dir: PathBuf,
    /// Grid rows per mosaic
    pub nrow: usize,
    /// Grid columns per mosaic
    pub ncol: usize,
}

/// Output of one tile job
#[derive(Debug, Clone, PartialEq)]
pub struct TileResult {
    /// Record of the written mosaic, carrying its size and source image ids
    pub record: ImageRecord,
    /// Boxes in mosaic coordinates, rounded for emission
    pub boxes: Vec<BBox>,
    /// Category ids, positionally paired with `boxes`
    pub category_ids: Vec<u64>,
    /// Crowd flags, positionally paired with `boxes`
    pub iscrowds: Vec<u8>,
}

/// A tile group bound to the context it is composed in
#[derive(Debug, Clone, Copy)]
pub struct TileJob<'a> {
    group: &'a TileGroup,
    context: &'a JobContext,
}

impl<'a> TileJob<'a> {
    /// Bind a group to its context
    pub const fn new(group: &'a TileGroup, context: &'a JobContext) -> Self {
        Self { group, context }
    }

    /// Path the mosaic of this job is written to
    pub fn output_path(&self) -> PathBuf {
        self.context
            .output_image_dir
            .join(tile_file_name(self.group.index))
    }

    /// Compose the group into a mosaic, write it and remap its annotations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any source image is missing or cannot be decoded
    /// - Composition fails
    /// - The mosaic cannot be written
    pub fn run(&self) -> Result<TileResult> {
        let entries = &self.group.entries;
        let paths: Vec<PathBuf> = entries
            .iter()
            .map(|entry| resolve_image_path(&self.context.img_dir, &entry.record))
            .collect();
        for path in &paths {
            require_file(path)?;
        }

        let images: Vec<Image> = paths
            .iter()
            .map(|path| decode(path))
            .collect::<Result<_>>()?;
        let boxes: Vec<Vec<BBox>> = entries.iter().map(|entry| entry.boxes()).collect();
        let category_ids: Vec<u64> = entries.iter().flat_map(|e| e.category_ids()).collect();
        let iscrowds: Vec<u8> = entries.iter().flat_map(|e| e.iscrowds()).collect();
        let original_img_ids: Vec<u64> = entries.iter().map(|e| e.record.id).collect();

        let (mosaic, remapped) = synthesize(self.context.nrow, self.context.ncol, images, boxes)?;

        let output_path = self.output_path();
        encode(&mosaic, &output_path)?;
        debug!(
            tile = self.group.index,
            sources = entries.len(),
            boxes = remapped.len(),
            path = %output_path.display(),
            "wrote mosaic"
        );

        Ok(TileResult {
            record: mosaic_record(self.group.index, &output_path, &mosaic, original_img_ids),
            boxes: remapped
                .into_iter()
                .map(|bbox| bbox.rounded(BOX_DECIMALS))
                .collect(),
            category_ids,
            iscrowds,
        })
    }
}

fn mosaic_record(
    index: usize,
    path: &Path,
    mosaic: &Image,
    original_img_ids: Vec<u64>,
) -> ImageRecord {
    ImageRecord {
        id: index as u64,
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        coco_url: Some(path.to_string_lossy().into_owned()),
        height: mosaic.height(),
        width: mosaic.width(),
        original_img_ids,
    }
}
