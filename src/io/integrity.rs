//! Read-only readability diagnostic for a directory of rasters.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::io::discovery::list_matching;
use crate::io::gdal::RasterReader;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    /// Number of files that were tried
    pub checked: usize,
    /// Files GDAL could not open, sorted
    pub unreadable: Vec<PathBuf>,
}

impl IntegrityReport {
    pub fn all_readable(&self) -> bool {
        self.unreadable.is_empty()
    }
}

/// Try to open every raster in `dir` matching `pattern`. Never modifies files.
pub fn check_rasters(dir: &Path, pattern: &str) -> Result<IntegrityReport> {
    let mut report = IntegrityReport::default();
    for path in list_matching(dir, pattern)? {
        report.checked += 1;
        if let Err(e) = RasterReader::open(&path) {
            warn!("Unreadable raster {:?}: {}", path, e);
            report.unreadable.push(path);
        }
    }
    report.unreadable.sort();

    if report.all_readable() {
        info!("All {} files in {:?} are readable.", report.checked, dir);
    } else {
        warn!(
            "{} of {} files in {:?} are unreadable:",
            report.unreadable.len(),
            report.checked,
            dir
        );
        for f in &report.unreadable {
            warn!("  {}", f.display());
        }
    }
    Ok(report)
}
