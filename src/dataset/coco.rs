//! Typed COCO records with eager validation at load time

use crate::geometry::BBox;
use crate::io::error::{MosaicError, Result, file_system, invalid_parameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Image entry of a COCO document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image identifier referenced by annotations
    pub id: u64,
    /// File name of the image
    pub file_name: String,
    /// Source URL; its last two path segments locate the file under the image directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coco_url: Option<String>,
    /// Image height in pixels
    pub height: u32,
    /// Image width in pixels
    pub width: u32,
    /// Source image identifiers a mosaic was built from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub original_img_ids: Vec<u64>,
}

/// Annotation entry of a COCO document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Annotation identifier
    #[serde(default)]
    pub id: u64,
    /// Identifier of the annotated image
    pub image_id: u64,
    /// Box area
    #[serde(default)]
    pub area: f64,
    /// Box in the annotated image's coordinates
    pub bbox: BBox,
    /// Segmentation payload, not interpreted
    #[serde(default)]
    pub segmentation: Value,
    /// Category identifier
    pub category_id: u64,
    /// Crowd flag (0 or 1)
    #[serde(default)]
    pub iscrowd: u8,
}

/// A COCO document: images, annotations and pass-through categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoDataset {
    /// Free-form dataset description
    #[serde(default)]
    pub info: Value,
    /// Image records
    pub images: Vec<ImageRecord>,
    /// Annotation records
    pub annotations: Vec<AnnotationRecord>,
    /// Category list, copied verbatim to the output
    #[serde(default)]
    pub categories: Vec<Value>,
}

impl CocoDataset {
    /// Read and validate a dataset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid COCO JSON, or
    /// contains an annotation with a non-finite or negative-size box
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(file_system(path, "open dataset"))?;
        let dataset: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            MosaicError::Dataset {
                path: path.to_path_buf(),
                operation: "parse",
                source: e,
            }
        })?;
        dataset.validate()?;

        info!(
            path = %path.display(),
            images = dataset.images.len(),
            annotations = dataset.annotations.len(),
            categories = dataset.categories.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Write the dataset as compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(file_system(path, "create dataset"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| MosaicError::Dataset {
            path: path.to_path_buf(),
            operation: "serialize",
            source: e,
        })?;
        writer.flush().map_err(file_system(path, "write dataset"))?;
        info!(path = %path.display(), "wrote dataset");
        Ok(())
    }

    /// Reject annotations whose boxes cannot be composed
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending annotation
    pub fn validate(&self) -> Result<()> {
        for ann in &self.annotations {
            let BBox { x, y, w, h } = ann.bbox;
            if ![x, y, w, h].iter().all(|v| v.is_finite()) || w < 0.0 || h < 0.0 {
                return Err(invalid_parameter(
                    "bbox",
                    &format!("{:?}", <[f64; 4]>::from(ann.bbox)),
                    &format!(
                        "annotation {} on image {} needs finite coordinates and non-negative size",
                        ann.id, ann.image_id
                    ),
                ));
            }
        }
        Ok(())
    }
}
