//! High-level, ergonomic library API: stack a directory of band files, check
//! and resample stacks, load them in time order and build training windows.
//! Batch entry points never abort on a single bad file; they return reports
//! listing what was saved, skipped and failed.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::params::PipelineParams;
use crate::core::processing::grouping::group_directory;
use crate::core::processing::normalize::normalize;
use crate::core::processing::resize::{rescaled_metadata, resample_stack};
use crate::core::processing::sequence::{SequenceWindows, build_sequences, stack_time_series};
use crate::core::processing::stack::{stack_file_name, stack_timestamp};
use crate::core::schema::StackSchema;
use crate::error::{Error, Result};
use crate::io::discovery::list_matching;
use crate::io::gdal::{RasterMetadata, RasterReader};
use crate::io::integrity::{IntegrityReport, check_rasters};
use crate::io::loader::{FailedFile, LoadedStacks, load_stacked_rasters};
use crate::io::writers::tiff::write_stack_tagged;
use crate::types::{DuplicateBandPolicy, ResampleKernel};

/// A timestamp that was not stacked, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedGroup {
    pub timestamp: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StackReport {
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<SkippedGroup>,
    pub failed: Vec<FailedFile>,
    /// Readability of the output directory after stacking
    pub integrity: IntegrityReport,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResampleReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

/// Shapes of the windows handed to the caller
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    pub schema: StackSchema,
    pub files: Vec<PathBuf>,
    pub windows: usize,
    pub input_shape: Vec<usize>,
    pub target_shape: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub stack: Option<StackReport>,
    pub resample: Option<ResampleReport>,
    pub resized_integrity: Option<IntegrityReport>,
    pub load_failures: Vec<FailedFile>,
    pub sequences: Option<WindowSummary>,
}

/// Group `params.input_dir` by timestamp and write one stack per complete
/// band set into `params.output_dir`, then check the written stacks.
pub fn stack_directory(params: &PipelineParams) -> Result<StackReport> {
    params.validate()?;
    std::fs::create_dir_all(&params.output_dir)?;

    let groups = group_directory(&params.input_dir, &params.raster_glob)?;
    info!(
        "Found {} timestamps in {:?}",
        groups.len(),
        params.input_dir
    );

    let mut report = StackReport::default();
    for (key, band_set) in &groups {
        let missing = band_set.missing_bands(&params.band_order);
        if !missing.is_empty() {
            info!("Skipping {}: incomplete band set (missing {:?})", key, missing);
            report.skipped.push(SkippedGroup {
                timestamp: key.to_string(),
                reason: format!("incomplete band set: missing {}", missing.join(",")),
            });
            continue;
        }

        let duplicated: Vec<&str> = band_set
            .duplicated_bands()
            .iter()
            .filter(|b| params.band_order.contains(b))
            .map(String::as_str)
            .collect();
        if params.duplicate_policy == DuplicateBandPolicy::Reject && !duplicated.is_empty() {
            info!("Skipping {}: duplicate band files for {:?}", key, duplicated);
            report.skipped.push(SkippedGroup {
                timestamp: key.to_string(),
                reason: format!("duplicate band files: {}", duplicated.join(",")),
            });
            continue;
        }

        match stack_timestamp(key, band_set, &params.band_order, &params.output_dir) {
            Ok(path) => report.saved.push(path),
            Err(e) => {
                warn!("Failed to stack {}: {}", key, e);
                let target = params.output_dir.join(stack_file_name(key));
                report.failed.push(FailedFile::new(target, e));
            }
        }
    }

    report.integrity = check_rasters(&params.output_dir, &params.raster_glob)?;
    info!(
        "Stacking complete: saved={} skipped={} failed={}",
        report.saved.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Resample one stack file by `scale_factor` and write it to `output`.
/// Band names, the acquisition key and nodata carry over; nodata pixels
/// are excluded from interpolation.
pub fn resample_file(
    input: &Path,
    output: &Path,
    scale_factor: f64,
    kernel: ResampleKernel,
) -> Result<RasterMetadata> {
    let (stack, target, tags) = {
        let reader = RasterReader::open(input)?;
        let target = rescaled_metadata(&reader.metadata, scale_factor)?;
        (reader.read_stack()?, target, reader.tags()?)
    };
    let resampled = resample_stack(
        stack.view(),
        target.width,
        target.height,
        kernel,
        target.no_data,
    )?;
    write_stack_tagged(output, resampled.view(), &target, Some(&tags))?;
    Ok(target)
}

/// Resample every raster in `input_dir` into `output_dir` under the same name.
pub fn resample_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &PipelineParams,
) -> Result<ResampleReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let mut report = ResampleReport::default();
    for file in list_matching(input_dir, &params.raster_glob)? {
        let Some(name) = file.file_name() else {
            continue;
        };
        let dst = output_dir.join(name);
        match resample_file(&file, &dst, params.scale_factor, params.kernel) {
            Ok(meta) => {
                info!(
                    "Resampled {:?} -> {:?} ({}x{})",
                    file, dst, meta.width, meta.height
                );
                report.written.push(dst);
            }
            Err(e) => {
                warn!("Failed to resample {:?}: {}", file, e);
                report.failed.push(FailedFile::new(&file, e));
            }
        }
    }
    info!(
        "Resampling complete: written={} failed={}",
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Check readability of every raster in `dir`.
pub fn check_directory(dir: &Path, params: &PipelineParams) -> Result<IntegrityReport> {
    check_rasters(dir, &params.raster_glob)
}

/// Load the stacks in `dir` in time order. Stacks whose band axis does not
/// match `params.band_order` are skipped; the first conforming stack fixes
/// the grid size, recorded in `LoadedStacks::schema`.
pub fn load_time_series(dir: &Path, params: &PipelineParams) -> Result<LoadedStacks> {
    load_stacked_rasters(dir, &params.stack_suffix, params.order, &params.band_order)
}

/// Load the stacks in `dir` and cut them into windows.
/// With `normalize_stacks`, each stack is rescaled to [0, 1] first.
pub fn sequences_from_directory(
    dir: &Path,
    params: &PipelineParams,
    normalize_stacks: bool,
) -> Result<(SequenceWindows, WindowSummary, Vec<FailedFile>)> {
    params.validate()?;
    let mut loaded = load_time_series(dir, params)?;
    let Some(schema) = loaded.schema.clone() else {
        return Err(Error::InsufficientTimeSteps {
            required: params.input_len + params.pred_len,
            available: loaded.len(),
            input_len: params.input_len,
            pred_len: params.pred_len,
        });
    };
    if normalize_stacks {
        for stack in loaded.stacks.iter_mut() {
            *stack = normalize(stack);
        }
    }

    let series = stack_time_series(&loaded.stacks)?;
    let windows = build_sequences(series.view(), params.input_len, params.pred_len)?;
    let summary = WindowSummary {
        schema,
        files: loaded.files,
        windows: windows.len(),
        input_shape: windows.inputs.shape().to_vec(),
        target_shape: windows.targets.shape().to_vec(),
    };
    Ok((windows, summary, loaded.failed))
}

/// Stack, check, resample, check and window in one pass.
pub fn run_pipeline(
    params: &PipelineParams,
    normalize_stacks: bool,
) -> Result<(PipelineReport, SequenceWindows)> {
    let mut report = PipelineReport {
        stack: Some(stack_directory(params)?),
        ..PipelineReport::default()
    };
    report.resample = Some(resample_directory(
        &params.output_dir,
        &params.resized_dir,
        params,
    )?);
    report.resized_integrity = Some(check_directory(&params.resized_dir, params)?);

    let (windows, summary, failed) =
        sequences_from_directory(&params.resized_dir, params, normalize_stacks)?;
    report.load_failures = failed;
    report.sequences = Some(summary);
    Ok((report, windows))
}
