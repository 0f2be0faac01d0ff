//! Full grid composition from horizontal row strips

use crate::composition::strip::compose_strip_with_filter;
use crate::geometry::{Axis, BBox};
use crate::io::error::{Result, invalid_parameter, shape_mismatch};
use crate::io::image::{DEFAULT_FILTER, FilterType, Image};

/// Compose up to `nrow * ncol` images into one mosaic
///
/// Images fill the grid row-major. The final row may hold fewer than `ncol`
/// tiles; the vertical pass rescales its strip to the common mosaic width like
/// any other row.
///
/// # Errors
///
/// Returns an error if:
/// - `nrow` or `ncol` is zero
/// - More than `nrow * ncol` images are supplied
/// - `boxes` is non-empty and its length differs from `images`
/// - `images` is empty
pub fn synthesize(
    nrow: usize,
    ncol: usize,
    images: Vec<Image>,
    boxes: Vec<Vec<BBox>>,
) -> Result<(Image, Vec<BBox>)> {
    synthesize_with_filter(nrow, ncol, images, boxes, DEFAULT_FILTER)
}

/// Compose a grid using an explicit interpolation filter
///
/// # Errors
///
/// Same conditions as [`synthesize`]
pub fn synthesize_with_filter(
    nrow: usize,
    ncol: usize,
    images: Vec<Image>,
    boxes: Vec<Vec<BBox>>,
    filter: FilterType,
) -> Result<(Image, Vec<BBox>)> {
    validate_grid(nrow, ncol, images.len())?;
    if !boxes.is_empty() && boxes.len() != images.len() {
        return Err(shape_mismatch(images.len(), boxes.len()));
    }

    let mut image_iter = images.into_iter();
    let mut box_iter = boxes.into_iter();
    let mut row_strips = Vec::with_capacity(nrow);
    let mut row_boxes = Vec::with_capacity(nrow);

    for _ in 0..nrow {
        let row_images: Vec<Image> = image_iter.by_ref().take(ncol).collect();
        if row_images.is_empty() {
            break;
        }
        let row_box_lists: Vec<Vec<BBox>> = box_iter.by_ref().take(ncol).collect();

        let (strip, strip_boxes) =
            compose_strip_with_filter(row_images, row_box_lists, Axis::Horizontal, filter)?;
        row_strips.push(strip);
        row_boxes.push(strip_boxes);
    }

    compose_strip_with_filter(row_strips, row_boxes, Axis::Vertical, filter)
}

fn validate_grid(nrow: usize, ncol: usize, count: usize) -> Result<()> {
    if nrow == 0 {
        return Err(invalid_parameter("nrow", &nrow, &"must be at least 1"));
    }
    if ncol == 0 {
        return Err(invalid_parameter("ncol", &ncol, &"must be at least 1"));
    }
    if count > nrow * ncol {
        return Err(invalid_parameter(
            "images",
            &count,
            &format!("a {nrow}x{ncol} grid holds at most {} images", nrow * ncol),
        ));
    }
    Ok(())
}
