//! Demo renderings of mosaics with their boxes outlined

use crate::dataset::{AnnotationRecord, CocoDataset};
use crate::geometry::BBox;
use crate::io::configuration::{DEMO_BOX_COLOR, DEMO_BOX_THICKNESS, tile_file_name};
use crate::io::error::Result;
use crate::io::image::{Image, decode, encode};
use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Outline `bbox` on `img` with a frame `thickness` pixels wide
///
/// Both rounded corners are drawn inclusively. The frame is centred on the box
/// edges: successive rings alternate one pixel inside and one pixel outside,
/// starting inside. Parts outside the image are clipped.
pub fn draw_box(img: &mut Image, bbox: &BBox, color: Rgb<u8>, thickness: i32) {
    let (x1, y1, x2, y2) = bbox.corners();
    for ring in 0..thickness.max(1) {
        let inset = ring_inset(ring);
        let width = (x2 - x1) + 1 - 2 * inset;
        let height = (y2 - y1) + 1 - 2 * inset;
        if width < 1 || height < 1 {
            continue;
        }
        let rect = Rect::at((x1 + inset) as i32, (y1 + inset) as i32)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(img, rect, color);
    }
}

// Ring 0 sits on the edge, then 1 in, 1 out, 2 in, 2 out, ...
const fn ring_inset(ring: i32) -> i64 {
    let step = ((ring + 1) / 2) as i64;
    if ring % 2 == 1 { step } else { -step }
}

/// Render the first `count` mosaics of `dataset` with outlined boxes
///
/// Mosaics are read from `image_dir` and renderings written to `demo_dir`
/// under the same file name scheme. Returns the number of renderings.
///
/// # Errors
///
/// Returns an error if a mosaic cannot be read or a rendering cannot be written
pub fn render_demo(
    dataset: &CocoDataset,
    count: usize,
    image_dir: &Path,
    demo_dir: &Path,
) -> Result<usize> {
    let by_image: HashMap<u64, Vec<&AnnotationRecord>> =
        dataset
            .annotations
            .iter()
            .fold(HashMap::new(), |mut map, ann| {
                map.entry(ann.image_id).or_insert_with(Vec::new).push(ann);
                map
            });

    let color = Rgb(DEMO_BOX_COLOR);
    let mut rendered = 0;
    for record in dataset.images.iter().take(count) {
        let mut img = decode(&image_dir.join(&record.file_name))?;
        for ann in by_image.get(&record.id).into_iter().flatten() {
            draw_box(&mut img, &ann.bbox, color, DEMO_BOX_THICKNESS);
        }
        encode(&img, &demo_dir.join(tile_file_name(record.id as usize)))?;
        rendered += 1;
    }

    info!(rendered, path = %demo_dir.display(), "wrote demo images");
    Ok(rendered)
}
