//! Source image lookup and output directory creation

use crate::dataset::ImageRecord;
use crate::io::error::{MosaicError, Result, file_system};
use std::fs;
use std::path::{Path, PathBuf};

/// Locate the file backing an image record under `img_dir`
///
/// With a `coco_url` the last two URL segments are used (for example
/// `val2017/000000397133.jpg`); otherwise the record's `file_name`.
pub fn resolve_image_path(img_dir: &Path, record: &ImageRecord) -> PathBuf {
    let segments: Vec<&str> = record
        .coco_url
        .as_deref()
        .map(|url| url.rsplit('/').filter(|s| !s.is_empty()).take(2).collect())
        .unwrap_or_default();

    if segments.is_empty() {
        return img_dir.join(&record.file_name);
    }
    segments
        .iter()
        .rev()
        .fold(img_dir.to_path_buf(), |path, segment| path.join(segment))
}

/// Fail unless `path` is an existing regular file
///
/// # Errors
///
/// Returns [`MosaicError::MissingFile`] if the file is absent
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(MosaicError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

/// Create a directory that must not exist yet
///
/// # Errors
///
/// Returns [`MosaicError::OutputExists`] if the directory is already present,
/// or a file system error if creation fails otherwise
pub fn create_fresh_dir(path: &Path) -> Result<PathBuf> {
    match fs::create_dir(path) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(MosaicError::OutputExists {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(file_system(path, "create directory")(e)),
    }
}

/// Create a directory and its parents, accepting an existing one
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(file_system(path, "create directory"))?;
    Ok(path.to_path_buf())
}
