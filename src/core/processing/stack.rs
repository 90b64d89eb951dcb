//! Combining one timestamp's single-band rasters into a multi-band stack.
use std::path::{Path, PathBuf};

use ndarray::Array3;
use tracing::info;

use crate::core::processing::grouping::{AcquisitionKey, BandSet};
use crate::error::{Error, Result};
use crate::io::gdal::{RasterMetadata, RasterReader};
use crate::io::writers::metadata::StackTags;
use crate::io::writers::tiff::write_stack_tagged;

/// File name of the stack for `key`: `<DATE>_<TIME>_stack.tif`.
pub fn stack_file_name(key: &AcquisitionKey) -> String {
    format!("{}_stack.tif", key)
}

/// Read band 1 of each file in `band_order` and stack them along axis 0.
///
/// The first file's metadata is the template; its band count becomes
/// `band_order.len()`. Every band must match the template's grid size.
pub fn build_stack(
    band_set: &BandSet,
    band_order: &[String],
) -> Result<(Array3<f64>, RasterMetadata)> {
    let paths = band_set.ordered_paths(band_order).ok_or_else(|| {
        Error::InvalidArgument {
            arg: "band_set",
            value: format!("missing bands {:?}", band_set.missing_bands(band_order)),
        }
    })?;

    let mut template: Option<RasterMetadata> = None;
    let mut stack: Option<Array3<f64>> = None;
    for (k, path) in paths.iter().enumerate() {
        let reader = RasterReader::open(path)?;
        let band = reader.read_band(1)?;
        let meta = template.get_or_insert_with(|| RasterMetadata {
            bands: band_order.len(),
            ..reader.metadata.clone()
        });
        if band.dim() != (meta.height, meta.width) {
            return Err(Error::ShapeMismatch {
                context: path.display().to_string(),
                expected: vec![meta.height, meta.width],
                found: band.shape().to_vec(),
            });
        }
        let out = stack
            .get_or_insert_with(|| Array3::zeros((band_order.len(), meta.height, meta.width)));
        out.index_axis_mut(ndarray::Axis(0), k).assign(&band);
    }

    match (stack, template) {
        (Some(stack), Some(meta)) => Ok((stack, meta)),
        _ => Err(Error::InvalidArgument {
            arg: "band_order",
            value: "[]".to_string(),
        }),
    }
}

/// Build the stack for `key` and write it to `output_dir`, naming each band.
pub fn stack_timestamp(
    key: &AcquisitionKey,
    band_set: &BandSet,
    band_order: &[String],
    output_dir: &Path,
) -> Result<PathBuf> {
    let (stack, meta) = build_stack(band_set, band_order)?;
    let output_path = output_dir.join(stack_file_name(key));
    let tags = StackTags {
        acquisition: Some(key.to_string()),
        band_names: band_order.to_vec(),
    };
    write_stack_tagged(&output_path, stack.view(), &meta, Some(&tags))?;
    info!(
        "Saved: {:?} ({} bands, {}x{}, {})",
        output_path, meta.bands, meta.width, meta.height, meta.pixel_type
    );
    Ok(output_path)
}
