mod common;

use bandstack::{
    DuplicateBandPolicy, PixelType, RasterReader, check_rasters, stack_directory,
};
use common::*;

#[test]
fn complete_band_set_produces_one_ordered_stack() {
    let root = tempfile::tempdir().unwrap();
    let params = params(root.path());
    write_band_set(&params.input_dir, "01JAN2024", "0300", &all_bands(), 10, 0.0);
    std::fs::write(params.input_dir.join("readme.txt"), b"notes").unwrap();
    write_band(&params.input_dir, "preview.tif", 10, 99.0);

    let report = stack_directory(&params).unwrap();

    let expected = params.output_dir.join("01JAN2024_0300_stack.tif");
    assert_eq!(report.saved, vec![expected.clone()]);
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());
    assert!(report.integrity.all_readable());
    assert_eq!(report.integrity.checked, 1);

    let reader = RasterReader::open(&expected).unwrap();
    assert_eq!(reader.metadata.bands, 6);
    assert_eq!((reader.metadata.width, reader.metadata.height), (10, 10));
    assert_eq!(reader.metadata.pixel_type, PixelType::F32);
    assert_eq!(
        reader.metadata.geotransform,
        [ORIGIN_X, PIXEL, 0.0, ORIGIN_Y, 0.0, -PIXEL]
    );
    let tags = reader.tags().unwrap();
    assert_eq!(tags.acquisition.as_deref(), Some("01JAN2024_0300"));
    assert_eq!(tags.band_names, all_bands());

    let stack = reader.read_stack().unwrap();
    for (k, band) in stack.outer_iter().enumerate() {
        let value = k as f64 + 1.0;
        assert!(band.iter().all(|&v| v == value), "band {} out of order", k);
    }
}

#[test]
fn incomplete_band_set_is_skipped() {
    let root = tempfile::tempdir().unwrap();
    let params = params(root.path());
    let bands: Vec<_> = all_bands().into_iter().filter(|b| *b != "WV").collect();
    write_band_set(&params.input_dir, "01JAN2024", "0300", &bands, 10, 0.0);

    let report = stack_directory(&params).unwrap();

    assert!(report.saved.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].timestamp, "01JAN2024_0300");
    assert!(report.skipped[0].reason.contains("WV"));
    assert_eq!(report.integrity.checked, 0);
    assert_eq!(std::fs::read_dir(&params.output_dir).unwrap().count(), 0);
}

#[test]
fn each_timestamp_is_handled_independently() {
    let root = tempfile::tempdir().unwrap();
    let params = params(root.path());
    write_band_set(&params.input_dir, "01JAN2024", "0300", &all_bands(), 8, 0.0);
    write_band_set(&params.input_dir, "01JAN2024", "0330", &all_bands()[..3], 8, 0.0);
    write_band_set(&params.input_dir, "01JAN2024", "0400", &all_bands()[1..], 8, 0.0);
    write_garbage(
        &params.input_dir,
        &band_file_name("01JAN2024", "0400", "VIS"),
    );

    let report = stack_directory(&params).unwrap();

    assert_eq!(report.saved, vec![params.output_dir.join("01JAN2024_0300_stack.tif")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].timestamp, "01JAN2024_0330");
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].path.ends_with("01JAN2024_0400_stack.tif"));
}

#[test]
fn duplicate_bands_follow_policy() {
    let root = tempfile::tempdir().unwrap();
    let mut params = params(root.path());
    write_band_set(&params.input_dir, "01JAN2024", "0300", &all_bands(), 6, 0.0);
    // Sorts after the L1C file, so it wins under last-wins.
    write_band(
        &params.input_dir,
        "3DIMG_01JAN2024_0300_L1C_ZZZ_IMG_VIS.tif",
        6,
        50.0,
    );

    let report = stack_directory(&params).unwrap();
    assert_eq!(report.saved.len(), 1);
    let stack = RasterReader::open(&report.saved[0])
        .unwrap()
        .read_stack()
        .unwrap();
    assert!(stack.index_axis(ndarray::Axis(0), 0).iter().all(|&v| v == 50.0));

    std::fs::remove_file(&report.saved[0]).unwrap();
    params.duplicate_policy = DuplicateBandPolicy::Reject;
    let report = stack_directory(&params).unwrap();
    assert!(report.saved.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("VIS"));
}

#[test]
fn integrity_check_lists_unreadable_files_without_touching_them() {
    let dir = tempfile::tempdir().unwrap();
    write_stack_file(dir.path(), "01JAN2024_0300_stack.tif", 6, 4, 1.0);
    let bad_b = write_garbage(dir.path(), "b_stack.tif");
    let bad_a = write_garbage(dir.path(), "a_stack.tif");
    std::fs::write(dir.path().join("ignored.txt"), b"x").unwrap();

    let report = check_rasters(dir.path(), "*.tif").unwrap();

    assert_eq!(report.checked, 3);
    assert!(!report.all_readable());
    assert_eq!(report.unreadable, vec![bad_a.clone(), bad_b.clone()]);
    assert!(bad_a.exists() && bad_b.exists());
}
