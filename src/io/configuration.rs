//! Mosaic constants and runtime configuration defaults

// Grid layout defaults
/// Default number of rows per mosaic
pub const DEFAULT_NROW: usize = 2;
/// Default number of columns per mosaic
pub const DEFAULT_NCOL: usize = 2;
/// Default number of worker threads
pub const DEFAULT_NUM_PROC: usize = 1;
/// Default number of demo images to render
pub const DEFAULT_DEMO: usize = 0;

// Default locations
/// Directory that source image locators are resolved against
pub const DEFAULT_IMG_DIR: &str = "datasets/coco";
/// Directory receiving all generated artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "output_mosaics";

// Output layout
/// Subdirectory of the output directory holding mosaic images
pub const IMAGES_DIR_NAME: &str = "images";
/// Subdirectory of the output directory holding demo renderings
pub const DEMO_DIR_NAME: &str = "demo";
/// File name of the emitted annotation set
pub const ANNOTATIONS_FILE_NAME: &str = "annotations.json";
/// Extension of emitted images
pub const OUTPUT_EXTENSION: &str = "jpg";
/// Quality of emitted JPEG images
pub const JPEG_QUALITY: u8 = 95;
/// Zero-padded width of emitted image file stems
pub const FILE_NAME_WIDTH: usize = 12;

/// Decimal places kept for emitted box coordinates and areas
pub const BOX_DECIMALS: i32 = 2;

/// Provenance string stored in the `info` field of the emitted dataset
pub const PROVENANCE: &str =
    "The mosaic images and annotations are generated by mosaic-synth from a COCO-style dataset.";

// Demo rendering
/// Outline colour for demo boxes
pub const DEMO_BOX_COLOR: [u8; 3] = [255, 0, 0];
/// Outline thickness for demo boxes in pixels
pub const DEMO_BOX_THICKNESS: i32 = 2;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Environment filter applied when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File name of a mosaic keyed by its 1-based tile index
pub fn tile_file_name(index: usize) -> String {
    format!(
        "{index:0width$}.{ext}",
        width = FILE_NAME_WIDTH,
        ext = OUTPUT_EXTENSION
    )
}
