use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{DEFAULT_BAND_ORDER, DuplicateBandPolicy, ResampleKernel, StackOrder};

/// Pipeline parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Directory holding the raw single-band rasters
    pub input_dir: PathBuf,
    /// Directory receiving `<timestamp>_stack.tif` files
    pub output_dir: PathBuf,
    /// Directory receiving resampled stacks (same file names)
    pub resized_dir: PathBuf,
    /// Required bands, in stacking order
    pub band_order: Vec<String>,
    /// Time steps per input window
    pub input_len: usize,
    /// Time steps per target window
    pub pred_len: usize,
    /// Resampling ratio; < 1 shrinks, > 1 enlarges
    pub scale_factor: f64,
    pub kernel: ResampleKernel,
    /// Glob used to discover rasters inside a directory
    pub raster_glob: String,
    /// File name suffix of stacked rasters
    pub stack_suffix: String,
    pub order: StackOrder,
    pub duplicate_policy: DuplicateBandPolicy,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images/INSAT3DR-L1C"),
            output_dir: PathBuf::from("stacked"),
            resized_dir: PathBuf::from("resized"),
            band_order: DEFAULT_BAND_ORDER.iter().map(|b| b.to_string()).collect(),
            input_len: 4,
            pred_len: 1,
            scale_factor: 0.25,
            kernel: ResampleKernel::Bilinear,
            raster_glob: "*.tif".to_string(),
            stack_suffix: "_stack.tif".to_string(),
            order: StackOrder::Lexicographic,
            duplicate_policy: DuplicateBandPolicy::LastWins,
        }
    }
}

impl PipelineParams {
    /// Load parameters from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: PipelineParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_len == 0 {
            return Err(Error::InvalidArgument {
                arg: "input_len",
                value: self.input_len.to_string(),
            });
        }
        if self.pred_len == 0 {
            return Err(Error::InvalidArgument {
                arg: "pred_len",
                value: self.pred_len.to_string(),
            });
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "scale_factor",
                value: self.scale_factor.to_string(),
            });
        }
        if self.band_order.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "band_order",
                value: "[]".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for band in &self.band_order {
            if band.is_empty() || !seen.insert(band.as_str()) {
                return Err(Error::InvalidArgument {
                    arg: "band_order",
                    value: self.band_order.join(","),
                });
            }
        }
        if self.resized_dir == self.output_dir {
            return Err(Error::InvalidArgument {
                arg: "resized_dir",
                value: self.resized_dir.display().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = PipelineParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.band_order, vec!["VIS", "SWIR", "MIR", "TIR1", "TIR2", "WV"]);
        assert_eq!(params.input_len, 4);
        assert_eq!(params.pred_len, 1);
        assert_eq!(params.scale_factor, 0.25);
    }

    #[test]
    fn rejects_bad_values() {
        let mut params = PipelineParams::default();
        params.scale_factor = 0.0;
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument { arg: "scale_factor", .. })
        ));

        let mut params = PipelineParams::default();
        params.band_order = vec!["VIS".into(), "VIS".into()];
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument { arg: "band_order", .. })
        ));

        let mut params = PipelineParams::default();
        params.pred_len = 0;
        assert!(params.validate().is_err());

        let mut params = PipelineParams::default();
        params.resized_dir = params.output_dir.clone();
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: PipelineParams =
            serde_json::from_str(r#"{"input_len": 6, "kernel": "lanczos3"}"#).unwrap();
        assert_eq!(params.input_len, 6);
        assert_eq!(params.kernel, ResampleKernel::Lanczos3);
        assert_eq!(params.pred_len, 1);
        assert_eq!(params.stack_suffix, "_stack.tif");
    }
}
