//! Tests for source image lookup and output directory handling

#[cfg(test)]
mod tests {
    use mosaic_synth::MosaicError;
    use mosaic_synth::dataset::ImageRecord;
    use mosaic_synth::io::paths::{create_fresh_dir, ensure_dir, require_file, resolve_image_path};
    use std::path::{Path, PathBuf};

    fn record(file_name: &str, coco_url: Option<&str>) -> ImageRecord {
        ImageRecord {
            id: 1,
            file_name: file_name.to_string(),
            coco_url: coco_url.map(str::to_string),
            height: 10,
            width: 10,
            original_img_ids: Vec::new(),
        }
    }

    // Tests the last two URL segments locate the source image
    // Verified by joining only the final segment
    #[test]
    fn test_resolve_from_coco_url() {
        let rec = record(
            "000000397133.jpg",
            Some("http://images.cocodataset.org/val2017/000000397133.jpg"),
        );
        assert_eq!(
            resolve_image_path(Path::new("datasets/coco"), &rec),
            PathBuf::from("datasets/coco/val2017/000000397133.jpg")
        );
    }

    // Tests records without a URL fall back to the file name
    // Verified by returning the image directory itself
    #[test]
    fn test_resolve_from_file_name() {
        let rec = record("a.jpg", None);
        assert_eq!(
            resolve_image_path(Path::new("imgs"), &rec),
            PathBuf::from("imgs/a.jpg")
        );

        let empty_url = record("b.jpg", Some(""));
        assert_eq!(
            resolve_image_path(Path::new("imgs"), &empty_url),
            PathBuf::from("imgs/b.jpg")
        );
    }

    // Tests missing sources are reported before decoding
    // Verified by accepting directories as files
    #[test]
    fn test_require_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("present.jpg");
        std::fs::write(&file, b"x").unwrap();

        assert!(require_file(&file).is_ok());
        assert!(matches!(
            require_file(dir.path()),
            Err(MosaicError::MissingFile { .. })
        ));
        assert!(matches!(
            require_file(&dir.path().join("absent.jpg")),
            Err(MosaicError::MissingFile { .. })
        ));
    }

    // Tests fresh directories refuse to reuse an existing one
    // Verified by switching to create_dir_all
    #[test]
    fn test_create_fresh_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("images");

        assert_eq!(create_fresh_dir(&target).unwrap(), target);
        assert!(matches!(
            create_fresh_dir(&target),
            Err(MosaicError::OutputExists { .. })
        ));
    }

    // Tests ensure_dir creates parents and tolerates existing directories
    // Verified by using create_dir without parents
    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
