//! Joining annotations to images and partitioning them into tile groups

use crate::dataset::coco::{AnnotationRecord, ImageRecord};
use crate::geometry::BBox;
use crate::io::error::{Result, invalid_parameter};
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A source image together with all of its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// The image record
    pub record: ImageRecord,
    /// Annotations whose `image_id` is this record's id, in dataset order
    pub annotations: Vec<AnnotationRecord>,
}

impl ImageEntry {
    /// Boxes of this image, in annotation order
    pub fn boxes(&self) -> Vec<BBox> {
        self.annotations.iter().map(|ann| ann.bbox).collect()
    }

    /// Category ids, positionally paired with [`Self::boxes`]
    pub fn category_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.annotations.iter().map(|ann| ann.category_id)
    }

    /// Crowd flags, positionally paired with [`Self::boxes`]
    pub fn iscrowds(&self) -> impl Iterator<Item = u8> + '_ {
        self.annotations.iter().map(|ann| ann.iscrowd)
    }
}

/// Images assigned to one mosaic
#[derive(Debug, Clone, PartialEq)]
pub struct TileGroup {
    /// 1-based sequential tile index
    pub index: usize,
    /// Group members in grid fill order
    pub entries: Vec<ImageEntry>,
}

/// Attach every annotation to the image it references
///
/// Annotations referencing an unknown image id are dropped with a warning.
pub fn attach_annotations(
    images: Vec<ImageRecord>,
    annotations: Vec<AnnotationRecord>,
) -> Vec<ImageEntry> {
    let by_image: HashMap<u64, Vec<AnnotationRecord>> =
        annotations
            .into_iter()
            .fold(HashMap::new(), |mut map, ann| {
                map.entry(ann.image_id).or_insert_with(Vec::new).push(ann);
                map
            });

    let known: HashSet<u64> = images.iter().map(|record| record.id).collect();
    let orphaned: usize = by_image
        .iter()
        .filter(|(image_id, _)| !known.contains(image_id))
        .map(|(_, anns)| anns.len())
        .sum();
    if orphaned > 0 {
        warn!(orphaned, "annotations reference unknown image ids and are ignored");
    }

    images
        .into_iter()
        .map(|record| {
            let annotations = by_image.get(&record.id).cloned().unwrap_or_default();
            ImageEntry {
                record,
                annotations,
            }
        })
        .collect()
}

/// Shuffle entries in place, reproducibly when a seed is given
pub fn shuffle_entries(entries: &mut [ImageEntry], seed: Option<u64>) {
    match seed {
        Some(seed) => entries.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => entries.shuffle(&mut rand::rng()),
    }
}

/// Split entries into consecutive groups of `group_size`
///
/// The final group may be smaller unless `drop_last` is set, in which case an
/// incomplete final group is discarded. Groups are numbered from 1.
///
/// # Errors
///
/// Returns an error if `group_size` is zero
pub fn partition(
    entries: Vec<ImageEntry>,
    group_size: usize,
    drop_last: bool,
) -> Result<Vec<TileGroup>> {
    if group_size == 0 {
        return Err(invalid_parameter(
            "group_size",
            &group_size,
            &"must be at least 1",
        ));
    }

    let mut groups: Vec<TileGroup> = Vec::with_capacity(entries.len().div_ceil(group_size));
    let mut iter = entries.into_iter().peekable();
    while iter.peek().is_some() {
        let members: Vec<ImageEntry> = iter.by_ref().take(group_size).collect();
        groups.push(TileGroup {
            index: groups.len() + 1,
            entries: members,
        });
    }

    if drop_last
        && groups
            .last()
            .is_some_and(|group| group.entries.len() != group_size)
    {
        if let Some(dropped) = groups.pop() {
            debug!(
                size = dropped.entries.len(),
                "dropped incomplete final group"
            );
        }
    }

    Ok(groups)
}
