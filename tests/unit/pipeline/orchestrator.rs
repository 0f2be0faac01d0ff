//! Tests for batch orchestration and dataset renumbering

#[cfg(test)]
mod tests {
    use crate::{annotation, write_sources};
    use mosaic_synth::MosaicError;
    use mosaic_synth::dataset::{CocoDataset, ImageRecord};
    use mosaic_synth::geometry::BBox;
    use mosaic_synth::io::progress::ProgressManager;
    use mosaic_synth::pipeline::orchestrator::renumber;
    use mosaic_synth::pipeline::{BatchOrchestrator, MosaicConfig, TileResult};
    use serde_json::{Value, json};
    use std::path::Path;

    fn dataset(img_dir: &Path, count: usize) -> CocoDataset {
        let images = write_sources(img_dir, &vec![(40, 40); count]);
        let annotations = images
            .iter()
            .map(|record| annotation(record.id, [1.0, 1.0, 8.0, 8.0], record.id % 3))
            .collect();
        CocoDataset {
            info: Value::Null,
            images,
            annotations,
            categories: vec![json!({"id": 1, "name": "thing"})],
        }
    }

    fn run(config: MosaicConfig, count: usize) -> CocoDataset {
        let root = tempfile::tempdir().unwrap();
        let img_dir = root.path().join("coco");
        let out_dir = root.path().join("images");
        std::fs::create_dir_all(&out_dir).unwrap();
        let source = dataset(&img_dir, count);

        BatchOrchestrator::new(config)
            .unwrap()
            .run(source, &img_dir, &out_dir)
            .unwrap()
    }

    // Tests configuration defaults describe a 2x2 single-worker run
    // Verified by changing the default grid size
    #[test]
    fn test_config_defaults() {
        let config = MosaicConfig::default();
        assert_eq!(config.group_size(), 4);
        assert_eq!(config.workers, 1);
        assert!(config.validate().is_ok());
    }

    // Tests zero-valued parameters are rejected at construction
    // Verified by validating only the grid shape
    #[test]
    fn test_config_validation() {
        let zero_workers = MosaicConfig {
            workers: 0,
            ..MosaicConfig::default()
        };
        assert!(matches!(
            BatchOrchestrator::new(zero_workers),
            Err(MosaicError::InvalidParameter {
                parameter: "workers",
                ..
            })
        ));

        let zero_cols = MosaicConfig {
            ncol: 0,
            ..MosaicConfig::default()
        };
        assert!(zero_cols.validate().is_err());
    }

    // Tests an incomplete final group is kept unless drop_last is set
    // Verified by always discarding the final group
    #[test]
    fn test_drop_last() {
        let kept = run(MosaicConfig::default(), 5);
        assert_eq!(kept.images.len(), 2);
        assert_eq!(kept.images[1].original_img_ids, vec![105]);

        let dropped = run(
            MosaicConfig {
                drop_last: true,
                ..MosaicConfig::default()
            },
            5,
        );
        assert_eq!(dropped.images.len(), 1);
        assert_eq!(dropped.annotations.len(), 4);
    }

    // Tests ids are dense and follow group order across several workers
    // Verified by numbering annotations per image
    #[test]
    fn test_dense_ids_with_workers() {
        let output = run(
            MosaicConfig {
                nrow: 1,
                ncol: 2,
                workers: 3,
                ..MosaicConfig::default()
            },
            6,
        );

        let image_ids: Vec<u64> = output.images.iter().map(|r| r.id).collect();
        assert_eq!(image_ids, vec![1, 2, 3]);
        let sources: Vec<Vec<u64>> = output
            .images
            .iter()
            .map(|r| r.original_img_ids.clone())
            .collect();
        assert_eq!(sources, vec![vec![101, 102], vec![103, 104], vec![105, 106]]);

        let annotation_ids: Vec<u64> = output.annotations.iter().map(|a| a.id).collect();
        assert_eq!(annotation_ids, (1..=6).collect::<Vec<_>>());
        let owners: Vec<u64> = output.annotations.iter().map(|a| a.image_id).collect();
        assert_eq!(owners, vec![1, 1, 2, 2, 3, 3]);
        assert_eq!(output.categories, vec![json!({"id": 1, "name": "thing"})]);
        assert!(output.info.is_string());
    }

    // Tests a seeded shuffle is reproducible and keeps every source once
    // Verified by reseeding from entropy on every run
    #[test]
    fn test_seeded_shuffle() {
        let config = MosaicConfig {
            shuffle: true,
            seed: Some(7),
            ..MosaicConfig::default()
        };
        let first = run(config, 8);
        let second = run(config, 8);

        let order = |data: &CocoDataset| -> Vec<u64> {
            data.images
                .iter()
                .flat_map(|r| r.original_img_ids.clone())
                .collect()
        };
        assert_eq!(order(&first), order(&second));

        let mut sorted = order(&first);
        sorted.sort_unstable();
        assert_eq!(sorted, (101..=108).collect::<Vec<_>>());
    }

    // Tests progress reports one step per tile
    // Verified by reporting once per source image
    #[test]
    fn test_progress_counts_tiles() {
        let root = tempfile::tempdir().unwrap();
        let img_dir = root.path().join("coco");
        let out_dir = root.path().join("images");
        std::fs::create_dir_all(&out_dir).unwrap();

        let mut orchestrator = BatchOrchestrator::new(MosaicConfig::default())
            .unwrap()
            .with_progress(ProgressManager::new());
        let output = orchestrator
            .run(dataset(&img_dir, 9), &img_dir, &out_dir)
            .unwrap();

        assert_eq!(output.images.len(), 3);
        assert_eq!(
            orchestrator.progress().map(ProgressManager::completed),
            Some(3)
        );
    }

    // Tests runs without a progress manager expose none
    // Verified by attaching a hidden manager by default
    #[test]
    fn test_progress_absent_by_default() {
        let orchestrator = BatchOrchestrator::new(MosaicConfig::default()).unwrap();
        assert!(orchestrator.progress().is_none());
        assert_eq!(orchestrator.config().group_size(), 4);
    }

    // Tests areas are recomputed from the emitted boxes
    // Verified by copying source areas through
    #[test]
    fn test_renumber_area_and_segmentation() {
        let result = TileResult {
            record: ImageRecord {
                id: 9,
                file_name: "000000000009.jpg".to_string(),
                coco_url: None,
                height: 10,
                width: 10,
                original_img_ids: vec![1],
            },
            boxes: vec![BBox::new(0.0, 0.0, 1.33, 3.33)],
            category_ids: vec![4],
            iscrowds: vec![1],
        };

        let output = renumber(vec![result], Vec::new()).unwrap();

        assert_eq!(output.images[0].id, 1);
        let ann = &output.annotations[0];
        assert_eq!((ann.id, ann.image_id), (1, 1));
        assert!((ann.area - 4.43).abs() < 1e-9);
        assert_eq!(ann.category_id, 4);
        assert_eq!(ann.iscrowd, 1);
        assert_eq!(ann.segmentation, json!([]));
    }

    // Tests results with disagreeing attribute counts are rejected
    // Verified by zipping to the shortest list
    #[test]
    fn test_renumber_count_mismatch() {
        let result = TileResult {
            record: ImageRecord {
                id: 1,
                file_name: String::new(),
                coco_url: None,
                height: 1,
                width: 1,
                original_img_ids: Vec::new(),
            },
            boxes: vec![BBox::default(); 2],
            category_ids: vec![1],
            iscrowds: vec![0, 0],
        };

        assert!(matches!(
            renumber(vec![result], Vec::new()),
            Err(MosaicError::InvalidParameter {
                parameter: "annotations",
                ..
            })
        ));
    }
}
