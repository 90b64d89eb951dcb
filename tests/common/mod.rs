#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bandstack::{PipelineParams, PixelType, RasterMetadata, write_stack};
use ndarray::Array3;

pub const ORIGIN_X: f64 = 500_000.0;
pub const ORIGIN_Y: f64 = 2_000_000.0;
pub const PIXEL: f64 = 10.0;

pub fn metadata(bands: usize, width: usize, height: usize) -> RasterMetadata {
    RasterMetadata {
        width,
        height,
        bands,
        geotransform: [ORIGIN_X, PIXEL, 0.0, ORIGIN_Y, 0.0, -PIXEL],
        projection: String::new(),
        pixel_type: PixelType::F32,
        no_data: None,
    }
}

pub fn band_file_name(date: &str, time: &str, band: &str) -> String {
    format!("3DIMG_{}_{}_L1C_ASIA_MER_IMG_{}.tif", date, time, band)
}

/// Write a constant single-band raster.
pub fn write_band(dir: &Path, name: &str, size: usize, value: f64) -> PathBuf {
    let path = dir.join(name);
    let data = Array3::from_elem((1, size, size), value);
    write_stack(&path, data.view(), &metadata(1, size, size)).unwrap();
    path
}

/// Write one file per band for `date`/`time`; band `k` holds `base + k + 1`.
pub fn write_band_set(dir: &Path, date: &str, time: &str, bands: &[&str], size: usize, base: f64) {
    for (k, band) in bands.iter().enumerate() {
        write_band(dir, &band_file_name(date, time, band), size, base + k as f64 + 1.0);
    }
}

/// Write a multi-band stack where every pixel of band `b` is `value + b`.
pub fn write_stack_file(dir: &Path, name: &str, bands: usize, size: usize, value: f64) -> PathBuf {
    let path = dir.join(name);
    let data = Array3::from_shape_fn((bands, size, size), |(b, _, _)| value + b as f64);
    write_stack(&path, data.view(), &metadata(bands, size, size)).unwrap();
    path
}

pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a raster").unwrap();
    path
}

pub fn params(root: &Path) -> PipelineParams {
    let params = PipelineParams {
        input_dir: root.join("raw"),
        output_dir: root.join("stacked"),
        resized_dir: root.join("resized"),
        ..PipelineParams::default()
    };
    std::fs::create_dir_all(&params.input_dir).unwrap();
    params
}

pub fn all_bands() -> Vec<&'static str> {
    bandstack::DEFAULT_BAND_ORDER.to_vec()
}

pub fn band_order() -> Vec<String> {
    all_bands().into_iter().map(String::from).collect()
}
