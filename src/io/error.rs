//! Error types for mosaic composition and dataset processing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Composition was invoked with zero tiles
    EmptyInput {
        /// Composition stage that received no tiles
        stage: &'static str,
    },

    /// Number of box lists disagrees with number of images
    ShapeMismatch {
        /// Number of images supplied
        images: usize,
        /// Number of box lists supplied
        boxes: usize,
    },

    /// A source image referenced by the dataset does not exist
    MissingFile {
        /// Resolved path of the missing image
        path: PathBuf,
    },

    /// Failed to decode a source image
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode a composed image to disk
    ImageEncode {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Output directory is already present and would be overwritten
    OutputExists {
        /// The pre-existing directory
        path: PathBuf,
    },

    /// An image with a zero-length side cannot be rescaled
    DegenerateImage {
        /// Position of the image within its strip
        index: usize,
        /// Image dimensions (height, width)
        dimensions: (u32, u32),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Dataset file could not be parsed or serialized as COCO JSON
    Dataset {
        /// Path to the dataset file
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The worker pool could not be started
    WorkerPool {
        /// Requested number of workers
        workers: usize,
        /// Underlying thread pool error
        source: rayon::ThreadPoolBuildError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { stage } => {
                write!(f, "Cannot compose {stage} from zero images")
            }
            Self::ShapeMismatch { images, boxes } => {
                write!(
                    f,
                    "Number of images (got {images}) does not match number of box lists (got {boxes})"
                )
            }
            Self::MissingFile { path } => {
                write!(f, "Source image '{}' does not exist", path.display())
            }
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageEncode { path, source } => {
                write!(
                    f,
                    "Failed to encode image to '{}': {source}",
                    path.display()
                )
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output directory '{}' already exists, refusing to overwrite",
                    path.display()
                )
            }
            Self::DegenerateImage { index, dimensions } => {
                write!(
                    f,
                    "Image {index} has degenerate size {}x{}",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Dataset {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Dataset error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::WorkerPool { workers, source } => {
                write!(f, "Failed to start {workers} workers: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageEncode { source, .. } => Some(source),
            Self::Dataset { source, .. } => Some(source),
            Self::WorkerPool { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a shape mismatch error from image and box-list counts
pub const fn shape_mismatch(images: usize, boxes: usize) -> MosaicError {
    MosaicError::ShapeMismatch { images, boxes }
}

/// Wrap an I/O error with the path and operation it came from
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError {
    let path = path.into();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}
