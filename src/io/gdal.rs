use gdal::{Dataset, errors::GdalError as GdalCrateError};
use ndarray::{Array2, Array3};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::io::writers::metadata::{StackTags, read_stack_tags};
use crate::types::PixelType;

/// Errors encountered when using the GDAL raster reader/writer
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Dimension mismatch: expected {0}x{1}, got {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),
}

/// Geographic extent of a raster grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

/// Metadata shared by every band of a raster; used as the write template
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    /// Width (pixels) of the raster
    pub width: usize,
    /// Height (lines) of the raster
    pub height: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format (may be empty)
    pub projection: String,
    pub pixel_type: PixelType,
    pub no_data: Option<f64>,
}

impl RasterMetadata {
    /// Extent covered by the grid. Rotation terms are ignored.
    pub fn bounds(&self) -> Bounds {
        let gt = self.geotransform;
        let left = gt[0];
        let top = gt[3];
        Bounds {
            left,
            bottom: top + gt[5] * self.height as f64,
            right: left + gt[1] * self.width as f64,
            top,
        }
    }

    /// Pixel size as (x, y); y is negative for north-up rasters.
    pub fn resolution(&self) -> (f64, f64) {
        (self.geotransform[1], self.geotransform[5])
    }
}

/// Reader for GDAL-supported rasters (GeoTIFF in practice)
pub struct RasterReader {
    pub dataset: Dataset,
    pub metadata: RasterMetadata,
}

impl RasterReader {
    /// Open a raster and collect its metadata
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GdalError> {
        let dataset = Dataset::open(path.as_ref())?;
        let (width, height) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(GdalError::UnsupportedFormat("No raster bands found".into()));
        }
        let geotransform = match dataset.geo_transform() {
            Ok(gt) => gt,
            Err(_) => [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        };
        let projection = dataset.projection();
        let (pixel_type, no_data) = {
            let first = dataset.rasterband(1)?;
            (PixelType::from_gdal(first.band_type()), first.no_data_value())
        };
        Ok(RasterReader {
            dataset,
            metadata: RasterMetadata {
                width: width as usize,
                height: height as usize,
                bands,
                geotransform,
                projection,
                pixel_type,
                no_data,
            },
        })
    }

    fn check_index(&self, index: usize) -> Result<(), GdalError> {
        if index == 0 || index > self.metadata.bands {
            return Err(GdalError::UnsupportedFormat(format!(
                "Band index {} out of range",
                index
            )));
        }
        Ok(())
    }

    /// Read a single band (1-based index) as an f64 ndarray of shape (height, width)
    pub fn read_band(&self, index: usize) -> Result<Array2<f64>, GdalError> {
        self.check_index(index)?;
        let band = self.dataset.rasterband(index)?;
        let (cols, rows) = (self.metadata.width, self.metadata.height);
        let buf = band.read_as::<f64>((0, 0), (cols, rows), (cols, rows), None)?;
        let data_vec = buf.data().to_vec();
        Array2::from_shape_vec((rows, cols), data_vec)
            .map_err(|_| GdalError::DimensionMismatch(cols, rows, cols, rows))
    }

    /// Band names and acquisition key embedded by the stack writer, if any
    pub fn tags(&self) -> Result<StackTags, GdalError> {
        read_stack_tags(&self.dataset)
    }

    /// Read every band into a (bands, height, width) array
    pub fn read_stack(&self) -> Result<Array3<f64>, GdalError> {
        let (bands, rows, cols) = (
            self.metadata.bands,
            self.metadata.height,
            self.metadata.width,
        );
        let mut stack = Array3::<f64>::zeros((bands, rows, cols));
        for (i, mut plane) in stack.outer_iter_mut().enumerate() {
            plane.assign(&self.read_band(i + 1)?);
        }
        Ok(stack)
    }
}
