//! I/O layer: GDAL-backed raster reading, directory discovery, the
//! readability check, ordered stack loading and GeoTIFF writers.
pub mod discovery;

pub mod gdal;
pub use gdal::{Bounds, GdalError, RasterMetadata, RasterReader};

pub mod integrity;
pub use integrity::{IntegrityReport, check_rasters};

pub mod loader;
pub use loader::{FailedFile, LoadedStacks, load_stacked_rasters, load_stacked_rasters_with_schema};

pub mod writers;
