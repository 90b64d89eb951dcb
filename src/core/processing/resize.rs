use crate::error::{Error, Result};
use crate::io::gdal::RasterMetadata;
use crate::types::ResampleKernel;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Zip};
use tracing::{debug, info};

/// `floor(width * s)` x `floor(height * s)`; an empty result is an error.
pub fn scaled_dimensions(width: usize, height: usize, scale_factor: f64) -> Result<(usize, usize)> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(Error::InvalidArgument {
            arg: "scale_factor",
            value: scale_factor.to_string(),
        });
    }
    let new_width = (width as f64 * scale_factor).floor() as usize;
    let new_height = (height as f64 * scale_factor).floor() as usize;
    if new_width == 0 || new_height == 0 {
        return Err(Error::DegenerateGrid {
            width,
            height,
            scale_factor,
        });
    }
    Ok((new_width, new_height))
}

/// Geotransform for the same extent sampled on a `new_width` x `new_height` grid.
/// The top-left origin is kept, rotation terms are dropped and the y pixel
/// size keeps the downward image-space sign.
pub fn rescaled_geotransform(meta: &RasterMetadata, new_width: usize, new_height: usize) -> [f64; 6] {
    let b = meta.bounds();
    let res_x = (b.right - b.left) / new_width as f64;
    let res_y = (b.top - b.bottom) / new_height as f64;
    [b.left, res_x, 0.0, b.top, 0.0, -res_y]
}

/// Metadata of `meta` moved onto the scaled grid; band count is preserved.
pub fn rescaled_metadata(meta: &RasterMetadata, scale_factor: f64) -> Result<RasterMetadata> {
    let (new_width, new_height) = scaled_dimensions(meta.width, meta.height, scale_factor)?;
    Ok(RasterMetadata {
        width: new_width,
        height: new_height,
        geotransform: rescaled_geotransform(meta, new_width, new_height),
        ..meta.clone()
    })
}

fn resize_options(kernel: ResampleKernel) -> ResizeOptions {
    let alg = match kernel {
        ResampleKernel::Nearest => ResizeAlg::Nearest,
        ResampleKernel::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleKernel::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleKernel::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    };
    ResizeOptions::new().resize_alg(alg)
}

fn resize_f32(
    band: ArrayView2<'_, f64>,
    target_cols: usize,
    target_rows: usize,
    kernel: ResampleKernel,
) -> Result<Array2<f64>> {
    let (rows, cols) = band.dim();
    let mut resizer = Resizer::new();

    // Convert the band into little-endian f32 bytes for fast_image_resize
    let mut src_bytes = Vec::with_capacity(band.len() * 4);
    for &v in band.iter() {
        src_bytes.extend_from_slice(&(v as f32).to_le_bytes());
    }

    let src_image = Image::from_vec_u8(cols as u32, rows as u32, src_bytes, PixelType::F32)
        .map_err(Error::resample)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::F32);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options(kernel))
        .map_err(Error::resample)?;

    let dst_bytes = dst_image.into_vec();
    let values: Vec<f64> = dst_bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
        .collect();
    Array2::from_shape_vec((target_rows, target_cols), values).map_err(Error::resample)
}

fn is_no_data(value: f64, no_data: f64) -> bool {
    if no_data.is_nan() {
        value.is_nan()
    } else {
        (value - no_data).abs() < 1e-9
    }
}

/// Resample one band onto a `target_cols` x `target_rows` grid.
/// Works in f32; both shrinking and enlarging are supported.
///
/// With `no_data`, sentinel pixels carry no weight: valid values are
/// averaged among themselves, and an output pixel whose valid weight is
/// below one half is written as `no_data`.
pub fn resample_band(
    band: ArrayView2<'_, f64>,
    target_cols: usize,
    target_rows: usize,
    kernel: ResampleKernel,
    no_data: Option<f64>,
) -> Result<Array2<f64>> {
    let Some(nd) = no_data else {
        return resize_f32(band, target_cols, target_rows, kernel);
    };
    if !band.iter().any(|&v| is_no_data(v, nd)) {
        return resize_f32(band, target_cols, target_rows, kernel);
    }

    let valid = band.mapv(|v| if is_no_data(v, nd) { 0.0 } else { 1.0 });
    let filled = band.mapv(|v| if is_no_data(v, nd) { 0.0 } else { v });
    let sums = resize_f32(filled.view(), target_cols, target_rows, kernel)?;
    let weights = resize_f32(valid.view(), target_cols, target_rows, kernel)?;
    Ok(Zip::from(&sums)
        .and(&weights)
        .map_collect(|&sum, &weight| if weight >= 0.5 { sum / weight } else { nd }))
}

/// Resample every band of a (bands, rows, cols) stack independently.
pub fn resample_stack(
    stack: ArrayView3<'_, f64>,
    target_cols: usize,
    target_rows: usize,
    kernel: ResampleKernel,
    no_data: Option<f64>,
) -> Result<Array3<f64>> {
    let (bands, rows, cols) = stack.dim();
    info!(
        "Resampling {} bands: {}x{} -> {}x{} ({})",
        bands, cols, rows, target_cols, target_rows, kernel
    );
    let mut out = Array3::<f64>::zeros((bands, target_rows, target_cols));
    for (i, (band, mut dst)) in stack.outer_iter().zip(out.outer_iter_mut()).enumerate() {
        debug!("Resampling band {}", i + 1);
        dst.assign(&resample_band(band, target_cols, target_rows, kernel, no_data)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelType as RasterPixelType;

    fn meta(width: usize, height: usize) -> RasterMetadata {
        RasterMetadata {
            width,
            height,
            bands: 6,
            geotransform: [500_000.0, 10.0, 0.0, 2_000_000.0, 0.0, -10.0],
            projection: String::new(),
            pixel_type: RasterPixelType::F32,
            no_data: None,
        }
    }

    #[test]
    fn dimensions_floor_and_reject_empty_grid() {
        assert_eq!(scaled_dimensions(100, 100, 0.25).unwrap(), (25, 25));
        assert_eq!(scaled_dimensions(10, 7, 0.5).unwrap(), (5, 3));
        assert_eq!(scaled_dimensions(10, 10, 2.0).unwrap(), (20, 20));
        assert!(matches!(
            scaled_dimensions(3, 3, 0.25),
            Err(Error::DegenerateGrid { .. })
        ));
        assert!(scaled_dimensions(3, 3, -1.0).is_err());
    }

    #[test]
    fn geotransform_preserves_extent() {
        let src = meta(100, 60);
        let dst = rescaled_metadata(&src, 0.25).unwrap();
        assert_eq!((dst.width, dst.height, dst.bands), (25, 15, 6));
        assert_eq!(dst.geotransform, [500_000.0, 40.0, 0.0, 2_000_000.0, 0.0, -40.0]);

        let (a, b) = (src.bounds(), dst.bounds());
        assert!((a.left - b.left).abs() < 1e-6);
        assert!((a.right - b.right).abs() < 1e-6);
        assert!((a.top - b.top).abs() < 1e-6);
        assert!((a.bottom - b.bottom).abs() < 1e-6);
    }

    #[test]
    fn extent_preserved_when_dimensions_round_down() {
        let src = meta(10, 10);
        let dst = rescaled_metadata(&src, 0.3).unwrap();
        assert_eq!((dst.width, dst.height), (3, 3));
        let (res_x, res_y) = dst.resolution();
        assert!((res_x * 3.0 - 100.0).abs() < 1e-9);
        assert!((-res_y * 3.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn constant_bands_stay_constant() {
        let stack = Array3::from_shape_fn((3, 40, 40), |(b, _, _)| (b + 1) as f64 * 10.0);
        for kernel in [ResampleKernel::Bilinear, ResampleKernel::Nearest] {
            let down = resample_stack(stack.view(), 10, 10, kernel, None).unwrap();
            assert_eq!(down.dim(), (3, 10, 10));
            for (b, band) in down.outer_iter().enumerate() {
                let expected = (b + 1) as f64 * 10.0;
                assert!(band.iter().all(|v| (v - expected).abs() < 1e-3));
            }
        }
        let up = resample_stack(stack.view(), 80, 60, ResampleKernel::Bilinear, None).unwrap();
        assert_eq!(up.dim(), (3, 60, 80));
        assert!(up.iter().all(|v| (10.0 - 1e-3..=30.0 + 1e-3).contains(v)));
    }

    #[test]
    fn bilinear_downsampling_stays_within_source_range() {
        let band = Array2::from_shape_fn((20, 20), |(r, c)| (r * 20 + c) as f64);
        let out = resample_band(band.view(), 5, 5, ResampleKernel::Bilinear, None).unwrap();
        assert!(out.iter().all(|v| (-1e-3..=399.0 + 1e-3).contains(v)));
        assert!(out[[0, 0]] < out[[4, 4]]);
    }

    #[test]
    fn no_data_border_is_not_blended_into_valid_pixels() {
        let nd = -9999.0;
        let band = Array2::from_shape_fn((20, 20), |(r, c)| {
            if r < 2 || c < 2 || r >= 18 || c >= 18 { nd } else { 100.0 }
        });
        for kernel in [ResampleKernel::Bilinear, ResampleKernel::Nearest] {
            let out = resample_band(band.view(), 5, 5, kernel, Some(nd)).unwrap();
            assert!(
                out.iter().all(|&v| v == nd || (v - 100.0).abs() < 1e-3),
                "blended value in {:?}",
                out
            );
            assert!((out[[2, 2]] - 100.0).abs() < 1e-3);
        }

        let blended = resample_band(band.view(), 5, 5, ResampleKernel::Bilinear, None).unwrap();
        assert!(blended[[0, 0]] < 0.0);
    }

    #[test]
    fn all_no_data_band_stays_no_data() {
        let band = Array2::from_elem((8, 8), f64::NAN);
        let out = resample_band(band.view(), 4, 4, ResampleKernel::Bilinear, Some(f64::NAN)).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
