use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use ndarray::ArrayView3;
use std::path::Path;

use crate::io::gdal::{GdalError, RasterMetadata};
use crate::io::writers::metadata::{StackTags, embed_stack_tags};
use crate::types::PixelType;

fn create_with_type<T: GdalType>(
    output: &Path,
    meta: &RasterMetadata,
) -> Result<Dataset, GdalError> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let ds = driver.create_with_band_type::<T, _>(output, meta.width, meta.height, meta.bands)?;
    Ok(ds)
}

/// Write a (bands, height, width) array as a GeoTIFF using `meta` as template.
/// Values are converted by GDAL into `meta.pixel_type`.
pub fn write_stack(
    output: &Path,
    stack: ArrayView3<'_, f64>,
    meta: &RasterMetadata,
) -> Result<(), GdalError> {
    write_stack_tagged(output, stack, meta, None)
}

/// Like [`write_stack`], additionally embedding band names and acquisition key.
pub fn write_stack_tagged(
    output: &Path,
    stack: ArrayView3<'_, f64>,
    meta: &RasterMetadata,
    tags: Option<&StackTags>,
) -> Result<(), GdalError> {
    let (bands, rows, cols) = stack.dim();
    if bands != meta.bands {
        return Err(GdalError::UnsupportedFormat(format!(
            "Array has {} bands, metadata declares {}",
            bands, meta.bands
        )));
    }
    if rows != meta.height || cols != meta.width {
        return Err(GdalError::DimensionMismatch(meta.width, meta.height, cols, rows));
    }

    let mut ds = match meta.pixel_type {
        PixelType::U8 => create_with_type::<u8>(output, meta)?,
        PixelType::U16 => create_with_type::<u16>(output, meta)?,
        PixelType::I16 => create_with_type::<i16>(output, meta)?,
        PixelType::U32 => create_with_type::<u32>(output, meta)?,
        PixelType::I32 => create_with_type::<i32>(output, meta)?,
        PixelType::F32 => create_with_type::<f32>(output, meta)?,
        PixelType::F64 => create_with_type::<f64>(output, meta)?,
    };
    ds.set_geo_transform(&meta.geotransform)?;
    if !meta.projection.is_empty() {
        ds.set_projection(&meta.projection)?;
    }

    if let Some(tags) = tags {
        embed_stack_tags(&mut ds, tags)?;
    }

    for (i, plane) in stack.outer_iter().enumerate() {
        let mut band = ds.rasterband(i + 1)?;
        let mut buf = Buffer::new((cols, rows), plane.iter().copied().collect());
        band.write((0, 0), (cols, rows), &mut buf)?;
        if meta.no_data.is_some() {
            band.set_no_data_value(meta.no_data)?;
        }
    }

    Ok(())
}
