//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, GDAL, glob and JSON errors, and provides semantic variants
//! for argument validation, grid/shape violations and insufficient time series.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] crate::io::GdalError),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error(
        "Scale factor {scale_factor} turns a {width}x{height} raster into an empty grid"
    )]
    DegenerateGrid {
        width: usize,
        height: usize,
        scale_factor: f64,
    },

    #[error("Shape mismatch in {context}: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Band order mismatch in {context}: expected {expected:?}, got {found:?}")]
    BandOrderMismatch {
        context: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error(
        "Insufficient time steps for configured window sizes: input_len={input_len} + pred_len={pred_len} requires {required}, available {available}"
    )]
    InsufficientTimeSteps {
        required: usize,
        available: usize,
        input_len: usize,
        pred_len: usize,
    },

    #[error("Time series is empty: no stacks to combine")]
    EmptyTimeSeries,

    #[error("Resampling error: {0}")]
    Resample(String),
}

impl Error {
    pub fn resample<E: std::fmt::Display>(e: E) -> Self {
        Error::Resample(e.to_string())
    }
}
