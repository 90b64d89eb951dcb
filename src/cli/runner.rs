use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bandstack::{
    IntegrityReport, PipelineParams, PipelineStep, check_directory, resample_directory,
    run_pipeline, sequences_from_directory, stack_directory,
};

use super::args::CliArgs;
use super::errors::AppError;

fn build_params(args: &CliArgs) -> Result<PipelineParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading parameters from {:?}", path);
            PipelineParams::from_json_file(path)?
        }
        None => PipelineParams::default(),
    };

    if let Some(dir) = &args.input_dir {
        params.input_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        params.output_dir = dir.clone();
    }
    if let Some(dir) = &args.resized_dir {
        params.resized_dir = dir.clone();
    }
    if let Some(bands) = &args.band_order {
        params.band_order = bands.iter().map(|b| b.trim().to_string()).collect();
    }
    if let Some(n) = args.input_len {
        params.input_len = n;
    }
    if let Some(n) = args.pred_len {
        params.pred_len = n;
    }
    if let Some(s) = args.scale_factor {
        params.scale_factor = s;
    }
    if let Some(k) = args.kernel {
        params.kernel = k;
    }
    if let Some(o) = args.order {
        params.order = o;
    }
    if let Some(d) = args.duplicates {
        params.duplicate_policy = d;
    }

    params.validate()?;
    Ok(params)
}

fn write_report<T: Serialize>(path: Option<&Path>, report: &T) -> Result<(), AppError> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json)?;
        info!("Report written to {:?}", path);
    }
    Ok(())
}

fn execute(args: &CliArgs) -> Result<(), AppError> {
    let params = build_params(args)?;
    let report_path = args.report.as_deref();

    info!("Running step {}", args.step);
    match args.step {
        PipelineStep::Stack => {
            let report = stack_directory(&params)?;
            info!("Saved: {}", report.saved.len());
            info!("Skipped: {}", report.skipped.len());
            info!("Errors: {}", report.failed.len());
            write_report(report_path, &report)?;
        }
        PipelineStep::Check => {
            let mut reports: Vec<(String, IntegrityReport)> = Vec::new();
            for dir in [&params.output_dir, &params.resized_dir] {
                if dir.is_dir() {
                    reports.push((dir.display().to_string(), check_directory(dir, &params)?));
                } else {
                    warn!("Skipping missing directory {:?}", dir);
                }
            }
            write_report(report_path, &reports)?;
            if let Some((dir, bad)) = reports.iter().find(|(_, r)| !r.all_readable()) {
                return Err(AppError::Unreadable {
                    dir: dir.clone(),
                    count: bad.unreadable.len(),
                });
            }
        }
        PipelineStep::Resize => {
            let report = resample_directory(&params.output_dir, &params.resized_dir, &params)?;
            info!("Written: {}", report.written.len());
            info!("Errors: {}", report.failed.len());
            write_report(report_path, &report)?;
        }
        PipelineStep::Sequence => {
            let (windows, summary, failed) =
                sequences_from_directory(&params.resized_dir, &params, args.normalize)?;
            info!(
                "Windows: {} X={:?} y={:?}",
                windows.len(),
                summary.input_shape,
                summary.target_shape
            );
            if !failed.is_empty() {
                warn!("{} stack(s) could not be loaded", failed.len());
            }
            write_report(report_path, &summary)?;
        }
        PipelineStep::All => {
            let (report, windows) = run_pipeline(&params, args.normalize)?;
            info!(
                "Pipeline complete: {} windows X={:?} y={:?}",
                windows.len(),
                windows.inputs.shape(),
                windows.targets.shape()
            );
            write_report(report_path, &report)?;
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    execute(&args)?;
    Ok(())
}
