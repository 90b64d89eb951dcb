use gdal::{Dataset, Metadata};
use tracing::debug;

use crate::io::gdal::GdalError;

/// Dataset-level metadata key holding the `DATE_TIME` acquisition key
pub const ACQUISITION_KEY: &str = "ACQUISITION";
/// Dataset-level metadata key holding the comma separated band order
pub const BAND_ORDER_KEY: &str = "BAND_ORDER";

/// Descriptive tags embedded in a written stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackTags {
    pub acquisition: Option<String>,
    /// One name per band; written as band descriptions
    pub band_names: Vec<String>,
}

/// Embed `tags` into an open dataset: band descriptions plus dataset metadata
pub fn embed_stack_tags(ds: &mut Dataset, tags: &StackTags) -> Result<(), GdalError> {
    if let Some(acq) = &tags.acquisition {
        ds.set_metadata_item(ACQUISITION_KEY, acq, "")?;
    }
    if !tags.band_names.is_empty() {
        ds.set_metadata_item(BAND_ORDER_KEY, &tags.band_names.join(","), "")?;
    }
    for (i, name) in tags.band_names.iter().enumerate() {
        let mut band = ds.rasterband(i + 1)?;
        band.set_description(name)?;
    }
    debug!("Embedded stack tags: {:?}", tags);
    Ok(())
}

/// Read back the tags written by [`embed_stack_tags`]; absent values stay empty
pub fn read_stack_tags(ds: &Dataset) -> Result<StackTags, GdalError> {
    let mut band_names = Vec::new();
    for i in 1..=ds.raster_count() as usize {
        let name = ds.rasterband(i)?.description()?;
        if name.is_empty() {
            return Ok(StackTags {
                acquisition: ds.metadata_item(ACQUISITION_KEY, ""),
                band_names: Vec::new(),
            });
        }
        band_names.push(name);
    }
    Ok(StackTags {
        acquisition: ds.metadata_item(ACQUISITION_KEY, ""),
        band_names,
    })
}
