//! Image decode, resize, concatenation and encode

use crate::geometry::Axis;
use crate::io::configuration::JPEG_QUALITY;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageError, RgbImage, imageops};
use std::fs;
use std::path::Path;

pub use image::imageops::FilterType;

/// Pixel buffer handled throughout the pipeline
pub type Image = RgbImage;

/// Interpolation used when rescaling tiles
pub const DEFAULT_FILTER: FilterType = FilterType::CatmullRom;

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn decode(path: &Path) -> Result<Image> {
    let img = image::open(path).map_err(|e| MosaicError::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Write an image to disk, format chosen by extension
///
/// JPEG files are written at [`JPEG_QUALITY`].
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn encode(img: &Image, path: &Path) -> Result<()> {
    let to_error = |source: ImageError| MosaicError::ImageEncode {
        path: path.to_path_buf(),
        source,
    };

    if !is_jpeg(path) {
        return img.save(path).map_err(to_error);
    }
    let mut bytes = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))
        .map_err(to_error)?;
    fs::write(path, bytes).map_err(|e| to_error(ImageError::IoError(e)))
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Resample to `(width, height)` with the given filter
///
/// Images already at the target size are returned as a copy without resampling.
pub fn resize(img: &Image, (width, height): (u32, u32), filter: FilterType) -> Image {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, filter)
}

/// Concatenate images along the main axis of `axis`
///
/// # Errors
///
/// Returns an error if `images` is empty or the images disagree on their
/// cross-axis length
pub fn concat(images: &[Image], axis: Axis) -> Result<Image> {
    let first = images.first().ok_or(MosaicError::EmptyInput {
        stage: axis.name(),
    })?;
    let cross = axis.cross_len(first.dimensions());

    if let Some(other) = images
        .iter()
        .find(|img| axis.cross_len(img.dimensions()) != cross)
    {
        return Err(invalid_parameter(
            "images",
            &format!("{:?}", other.dimensions()),
            &format!("cross-axis length must be {cross} for every image"),
        ));
    }

    let main: u32 = images
        .iter()
        .map(|img| axis.main_len(img.dimensions()))
        .sum();
    let (width, height) = axis.dimensions(cross, main);
    let mut out: Image = ImageBuffer::new(width, height);

    let mut offset = 0i64;
    for img in images {
        match axis {
            Axis::Horizontal => imageops::replace(&mut out, img, offset, 0),
            Axis::Vertical => imageops::replace(&mut out, img, 0, offset),
        }
        offset += i64::from(axis.main_len(img.dimensions()));
    }

    Ok(out)
}
