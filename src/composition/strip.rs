//! Single row or column composition with bounding box remapping
//!
//! Every tile of a strip is rescaled so that its cross-axis length equals the
//! smallest cross-axis length among the tiles, preserving aspect ratio. The
//! rescaled tiles are concatenated in input order and each tile's boxes are
//! scaled by the same factors and shifted by the accumulated main-axis length
//! of all preceding tiles.

use crate::geometry::{Axis, BBox};
use crate::io::error::{MosaicError, Result, shape_mismatch};
use crate::io::image::{DEFAULT_FILTER, FilterType, Image, concat, resize};
use tracing::debug;

/// Compose a strip with the default cubic filter
///
/// `boxes` is either empty (no annotations supplied) or holds exactly one box
/// list per image, possibly zero-length.
///
/// # Errors
///
/// Returns an error if:
/// - `images` is empty
/// - `boxes` is non-empty and its length differs from `images`
/// - An image has a zero-length side
pub fn compose_strip(
    images: Vec<Image>,
    boxes: Vec<Vec<BBox>>,
    axis: Axis,
) -> Result<(Image, Vec<BBox>)> {
    compose_strip_with_filter(images, boxes, axis, DEFAULT_FILTER)
}

/// Compose a strip using an explicit interpolation filter
///
/// # Errors
///
/// Same conditions as [`compose_strip`]
pub fn compose_strip_with_filter(
    images: Vec<Image>,
    boxes: Vec<Vec<BBox>>,
    axis: Axis,
    filter: FilterType,
) -> Result<(Image, Vec<BBox>)> {
    match images.len() {
        0 => {
            return Err(MosaicError::EmptyInput {
                stage: axis.name(),
            });
        }
        1 => return pass_through(images, boxes, axis),
        _ => {}
    }

    if !boxes.is_empty() && boxes.len() != images.len() {
        return Err(shape_mismatch(images.len(), boxes.len()));
    }

    let source_dims: Vec<(u32, u32)> = images.iter().map(Image::dimensions).collect();
    if let Some((index, &(width, height))) = source_dims
        .iter()
        .enumerate()
        .find(|(_, (width, height))| *width == 0 || *height == 0)
    {
        return Err(MosaicError::DegenerateImage {
            index,
            dimensions: (height, width),
        });
    }

    let min_len = source_dims
        .iter()
        .map(|&dims| axis.cross_len(dims))
        .min()
        .ok_or(MosaicError::EmptyInput {
            stage: axis.name(),
        })?;

    let target_dims: Vec<(u32, u32)> = source_dims
        .iter()
        .map(|&dims| {
            let scaled = scaled_length(axis.main_len(dims), axis.cross_len(dims), min_len);
            axis.dimensions(min_len, scaled)
        })
        .collect();

    let resized: Vec<Image> = images
        .iter()
        .zip(&target_dims)
        .map(|(img, &dims)| resize(img, dims, filter))
        .collect();
    drop(images);

    let strip = concat(&resized, axis)?;
    debug!(
        axis = axis.name(),
        tiles = resized.len(),
        cross = min_len,
        width = strip.width(),
        height = strip.height(),
        "composed strip"
    );

    if boxes.is_empty() {
        return Ok((strip, Vec::new()));
    }

    let remapped = remap_boxes(boxes, &source_dims, &target_dims, axis);
    Ok((strip, remapped))
}

// Aspect-preserving main-axis length once the cross axis is set to `min_len`
fn scaled_length(main: u32, cross: u32, min_len: u32) -> u32 {
    let scaled = f64::from(main) * f64::from(min_len) / f64::from(cross);
    scaled.round_ties_even().max(1.0) as u32
}

fn remap_boxes(
    boxes: Vec<Vec<BBox>>,
    source_dims: &[(u32, u32)],
    target_dims: &[(u32, u32)],
    axis: Axis,
) -> Vec<BBox> {
    let total = boxes.iter().map(Vec::len).sum();
    let mut remapped = Vec::with_capacity(total);
    let mut shift = 0u32;

    for ((list, &(src_w, src_h)), &(dst_w, dst_h)) in
        boxes.into_iter().zip(source_dims).zip(target_dims)
    {
        let sx = f64::from(dst_w) / f64::from(src_w);
        let sy = f64::from(dst_h) / f64::from(src_h);
        let offset = f64::from(shift);
        remapped.extend(
            list.into_iter()
                .map(|bbox| bbox.scaled(sx, sy).shifted(axis, offset)),
        );
        shift += axis.main_len((dst_w, dst_h));
    }

    remapped
}

// A lone tile is returned untouched together with its single box list
fn pass_through(
    images: Vec<Image>,
    boxes: Vec<Vec<BBox>>,
    axis: Axis,
) -> Result<(Image, Vec<BBox>)> {
    if boxes.len() > 1 {
        return Err(shape_mismatch(images.len(), boxes.len()));
    }
    let image = images.into_iter().next().ok_or(MosaicError::EmptyInput {
        stage: axis.name(),
    })?;
    Ok((image, boxes.into_iter().next().unwrap_or_default()))
}
