//! Ordered load of stacked rasters into memory, one array per time step.
use std::path::{Path, PathBuf};

use ndarray::Array3;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::processing::grouping::parse_timestamp;
use crate::core::schema::StackSchema;
use crate::error::{Error, Result};
use crate::io::discovery::list_with_suffix;
use crate::io::gdal::RasterReader;
use crate::types::StackOrder;

/// A file a batch step could not handle, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

impl FailedFile {
    pub fn new(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        Self {
            path: path.into(),
            error: error.to_string(),
        }
    }
}

/// Stacks loaded in time order; `files[i]` is the source of `stacks[i]`.
#[derive(Debug, Clone, Default)]
pub struct LoadedStacks {
    pub files: Vec<PathBuf>,
    pub stacks: Vec<Array3<f64>>,
    pub failed: Vec<FailedFile>,
    /// Shape every loaded stack conforms to; `None` when nothing loaded
    pub schema: Option<StackSchema>,
}

impl LoadedStacks {
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// Sort stack files along the time axis.
pub fn order_stack_files(files: &mut [PathBuf], order: StackOrder, suffix: &str) {
    match order {
        StackOrder::Lexicographic => files.sort_by(|a, b| a.file_name().cmp(&b.file_name())),
        StackOrder::Chronological => files.sort_by_key(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let when = name.strip_suffix(suffix).and_then(parse_timestamp);
            // Unparseable names sort after every dated one.
            (when.is_none(), when, name)
        }),
    }
}

/// Load every `*<suffix>` raster in `dir` in time order.
///
/// Each stack must carry one band per entry of `band_order`, and band names
/// embedded by the writer must match it. The first conforming stack fixes the
/// grid size. Anything else is reported and skipped. An empty or missing
/// directory yields an empty result, not an error.
pub fn load_stacked_rasters(
    dir: &Path,
    suffix: &str,
    order: StackOrder,
    band_order: &[String],
) -> Result<LoadedStacks> {
    load_ordered(dir, suffix, order, band_order, None)
}

/// Like [`load_stacked_rasters`], but every stack must match `schema` exactly.
pub fn load_stacked_rasters_with_schema(
    dir: &Path,
    suffix: &str,
    order: StackOrder,
    schema: &StackSchema,
) -> Result<LoadedStacks> {
    load_ordered(dir, suffix, order, &schema.band_order, Some(schema.clone()))
}

fn read_tagged_stack(path: &Path, band_order: &[String]) -> Result<Array3<f64>> {
    let reader = RasterReader::open(path)?;
    let tags = reader.tags()?;
    if !tags.band_names.is_empty() && tags.band_names != band_order {
        return Err(Error::BandOrderMismatch {
            context: path.display().to_string(),
            expected: band_order.to_vec(),
            found: tags.band_names,
        });
    }
    Ok(reader.read_stack()?)
}

fn load_ordered(
    dir: &Path,
    suffix: &str,
    order: StackOrder,
    band_order: &[String],
    mut schema: Option<StackSchema>,
) -> Result<LoadedStacks> {
    let mut files = list_with_suffix(dir, suffix)?;
    let mut loaded = LoadedStacks::default();
    if files.is_empty() {
        warn!("No files found matching pattern '{}' in {:?}", suffix, dir);
        return Ok(loaded);
    }
    order_stack_files(&mut files, order, suffix);

    for path in files {
        let stack = match read_tagged_stack(&path, band_order) {
            Ok(stack) => stack,
            Err(e) => {
                warn!("Error loading {:?}: {}", path, e);
                loaded.failed.push(FailedFile::new(&path, e));
                continue;
            }
        };

        let (bands, height, width) = stack.dim();
        if schema.is_none() && bands == band_order.len() {
            debug!("Grid {}x{} fixed by {:?}", width, height, path);
            schema = Some(StackSchema::new(band_order.to_vec(), width, height));
        }
        let context = path.display().to_string();
        let checked = match &schema {
            Some(s) => s.check(stack.view(), &context),
            None => Err(Error::ShapeMismatch {
                context,
                expected: vec![band_order.len()],
                found: vec![bands],
            }),
        };
        if let Err(err) = checked {
            warn!("Skipping {:?}: {}", path, err);
            loaded.failed.push(FailedFile::new(&path, err));
            continue;
        }

        info!(
            "Loaded: {} - Shape: {:?}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            stack.dim()
        );
        loaded.files.push(path);
        loaded.stacks.push(stack);
    }

    if !loaded.is_empty() {
        loaded.schema = schema;
    }
    info!("Successfully loaded {} raster files", loaded.len());
    Ok(loaded)
}
