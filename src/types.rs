//! Shared types and enums used across bandstack.
//! Includes `PixelType`, `ResampleKernel`, `StackOrder`, `DuplicateBandPolicy`,
//! `PipelineStep` and the default band vocabulary.
use clap::ValueEnum;
use gdal::raster::GdalDataType;
use serde::{Deserialize, Serialize};

/// Default band vocabulary, in stacking order.
pub const DEFAULT_BAND_ORDER: [&str; 6] = ["VIS", "SWIR", "MIR", "TIR1", "TIR2", "WV"];

/// Pixel data type of a raster, as stored on disk.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelType {
    U8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl PixelType {
    /// Map a GDAL band type; types without a dedicated variant are stored as f64.
    pub fn from_gdal(data_type: GdalDataType) -> Self {
        match data_type {
            GdalDataType::UInt8 => PixelType::U8,
            GdalDataType::UInt16 => PixelType::U16,
            GdalDataType::Int16 => PixelType::I16,
            GdalDataType::UInt32 => PixelType::U32,
            GdalDataType::Int32 => PixelType::I32,
            GdalDataType::Float32 => PixelType::F32,
            _ => PixelType::F64,
        }
    }
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PixelType::U8 => "u8",
            PixelType::U16 => "u16",
            PixelType::I16 => "i16",
            PixelType::U32 => "u32",
            PixelType::I32 => "i32",
            PixelType::F32 => "f32",
            PixelType::F64 => "f64",
        };
        write!(f, "{}", s)
    }
}

/// Interpolation kernel used when resampling bands onto a new grid.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleKernel {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl std::fmt::Display for ResampleKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleKernel::Nearest => write!(f, "Nearest"),
            ResampleKernel::Bilinear => write!(f, "Bilinear"),
            ResampleKernel::CatmullRom => write!(f, "CatmullRom"),
            ResampleKernel::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// How stack files are ordered along the time axis when loaded.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StackOrder {
    /// Sort by file name; the naming scheme must encode time.
    #[default]
    Lexicographic,
    /// Sort by the acquisition time parsed from the `DDMmmYYYY_HHMM` prefix.
    Chronological,
}

/// What to do when one timestamp has several files for the same band.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateBandPolicy {
    /// Keep the last file in sorted path order.
    #[default]
    LastWins,
    /// Skip the whole timestamp.
    Reject,
}

impl std::fmt::Display for DuplicateBandPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateBandPolicy::LastWins => write!(f, "LastWins"),
            DuplicateBandPolicy::Reject => write!(f, "Reject"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum PipelineStep {
    Stack,
    Check,
    Resize,
    Sequence,
    All,
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStep::Stack => write!(f, "Stack"),
            PipelineStep::Check => write!(f, "Check"),
            PipelineStep::Resize => write!(f, "Resize"),
            PipelineStep::Sequence => write!(f, "Sequence"),
            PipelineStep::All => write!(f, "All"),
        }
    }
}
