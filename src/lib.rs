#![doc = r#"
BANDSTACK — multi-band satellite raster stacking and time-series window building.

This crate turns directories of per-band single-image GeoTIFFs (one file per band
per acquisition) into co-registered multi-band stacks, resamples them to a uniform
reduced resolution while keeping their georeferencing, and cuts the time-ordered
stacks into fixed-length (input, target) windows for sequence-prediction training.
It powers the `bandstack` CLI and can be embedded in your own Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Pipeline
--------
raw band files → [`core::processing::grouping`] → [`core::processing::stack`] →
[`io::integrity`] → [`core::processing::resize`] → [`io::loader`] →
[`core::processing::sequence`] → `(X, y)`.

Input files must be named `<satellite>_<DDMmmYYYY>_<HHMM>_..._IMG_<BAND>.tif`;
files that do not match are ignored.

Quick start: run every stage
----------------------------
```rust,no_run
use std::path::PathBuf;
use bandstack::{run_pipeline, PipelineParams};

fn main() -> bandstack::Result<()> {
    let params = PipelineParams {
        input_dir: PathBuf::from("/data/INSAT3DR-L1C"),
        output_dir: PathBuf::from("/work/stacked"),
        resized_dir: PathBuf::from("/work/resized"),
        ..PipelineParams::default()
    };

    let (report, windows) = run_pipeline(&params, true)?;
    println!(
        "stacks={} windows={} X={:?} y={:?}",
        report.stack.map(|s| s.saved.len()).unwrap_or(0),
        windows.len(),
        windows.inputs.shape(),
        windows.targets.shape(),
    );
    Ok(())
}
```

Windows from arrays already in memory
-------------------------------------
```rust
use ndarray::Array3;
use bandstack::{build_sequences, stack_time_series};

fn main() -> bandstack::Result<()> {
    let stacks: Vec<Array3<f64>> = (0..6)
        .map(|t| Array3::from_elem((6, 10, 10), t as f64))
        .collect();
    let series = stack_time_series(&stacks)?;
    let windows = build_sequences(series.view(), 4, 1)?;
    assert_eq!(windows.inputs.shape(), &[2, 4, 6, 10, 10]);
    assert_eq!(windows.targets.shape(), &[2, 1, 6, 10, 10]);
    Ok(())
}
```

Error handling
--------------
Batch steps ([`stack_directory`], [`resample_directory`], [`check_rasters`],
[`load_stacked_rasters`]) record per-file problems in their reports and keep
going. Building windows from too few time steps is a hard error:

```rust
use ndarray::Array4;
use bandstack::{build_sequences, Error};

let series = Array4::<f64>::zeros((3, 6, 10, 10));
match build_sequences(series.view(), 4, 1) {
    Err(Error::InsufficientTimeSteps { required, available, .. }) => {
        assert_eq!((required, available), (5, 3));
    }
    _ => unreachable!(),
}
```

Useful modules
--------------
- [`api`] — directory-level entry points and their reports.
- [`core`] — grouping, stacking, resampling, normalization and windows.
- [`io`] — GDAL reader/writer, discovery, integrity check and ordered loading.
- [`types`] — enums shared across the crate.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::PipelineParams;
pub use core::schema::StackSchema;
pub use error::{Error, Result};
pub use types::{
    DEFAULT_BAND_ORDER, DuplicateBandPolicy, PipelineStep, PixelType, ResampleKernel, StackOrder,
};

// Processing primitives
pub use core::processing::grouping::{
    AcquisitionKey, BandGroups, BandSet, group_band_files, group_directory, parse_band_file_name,
};
pub use core::processing::normalize::normalize;
pub use core::processing::resize::{rescaled_metadata, resample_stack, scaled_dimensions};
pub use core::processing::sequence::{SequenceWindows, build_sequences, stack_time_series};
pub use core::processing::stack::{build_stack, stack_timestamp};

// Readers and writers
pub use io::writers::metadata::StackTags;
pub use io::writers::tiff::{write_stack, write_stack_tagged};
pub use io::{
    FailedFile, GdalError, IntegrityReport, LoadedStacks, RasterMetadata, RasterReader,
    check_rasters, load_stacked_rasters, load_stacked_rasters_with_schema,
};

// High-level API re-exports
pub use api::{
    PipelineReport, ResampleReport, SkippedGroup, StackReport, WindowSummary, check_directory,
    load_time_series, resample_directory, resample_file, run_pipeline, sequences_from_directory,
    stack_directory,
};
