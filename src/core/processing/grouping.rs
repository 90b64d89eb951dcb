//! Filename parsing and grouping of per-band rasters by acquisition timestamp.
//!
//! Expected names look like `3DIMG_01JAN2024_0300_L1C_ASIA_MER_IMG_VIS.tif`:
//! a satellite id, the date (`DDMmmYYYY`), the time (`HHMM`), any product
//! fields, then `IMG_<BAND>`. Anything else is skipped without error.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::io::discovery::list_matching;

static BAND_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]+)_(\d{2}[A-Z]{3}\d{4})_(\d{4})_.*_IMG_([A-Za-z0-9]+)\.(?i:tif)$")
        .expect("band file pattern is valid")
});

const TIMESTAMP_FORMAT: &str = "%d%b%Y_%H%M";

/// Parse a `DDMmmYYYY_HHMM` key (e.g. `01JAN2024_0300`) into a date-time.
pub fn parse_timestamp(key: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(key, TIMESTAMP_FORMAT).ok()
}

/// Identifies one acquisition instant; displays as `DATE_TIME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AcquisitionKey {
    pub date: String,
    pub time: String,
}

impl AcquisitionKey {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.to_string())
    }
}

impl std::fmt::Display for AcquisitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.date, self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandFileName {
    pub satellite: String,
    pub key: AcquisitionKey,
    pub band: String,
}

pub fn parse_band_file_name(name: &str) -> Option<BandFileName> {
    let caps = BAND_FILE_RE.captures(name)?;
    Some(BandFileName {
        satellite: caps[1].to_string(),
        key: AcquisitionKey::new(&caps[2], &caps[3]),
        band: caps[4].to_string(),
    })
}

/// Band name -> raster path for one timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandSet {
    files: BTreeMap<String, PathBuf>,
    duplicated: Vec<String>,
}

impl BandSet {
    /// Insert a band file; an existing entry for the band is replaced and returned.
    pub fn insert(&mut self, band: impl Into<String>, path: PathBuf) -> Option<PathBuf> {
        let band = band.into();
        let replaced = self.files.insert(band.clone(), path);
        if replaced.is_some() && !self.duplicated.contains(&band) {
            self.duplicated.push(band);
        }
        replaced
    }

    pub fn get(&self, band: &str) -> Option<&Path> {
        self.files.get(band).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bands that were supplied by more than one file.
    pub fn duplicated_bands(&self) -> &[String] {
        &self.duplicated
    }

    pub fn missing_bands(&self, band_order: &[String]) -> Vec<String> {
        band_order
            .iter()
            .filter(|b| !self.files.contains_key(b.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_complete(&self, band_order: &[String]) -> bool {
        band_order.iter().all(|b| self.files.contains_key(b.as_str()))
    }

    /// Paths in `band_order`, or `None` if any band is missing.
    pub fn ordered_paths(&self, band_order: &[String]) -> Option<Vec<&Path>> {
        band_order.iter().map(|b| self.get(b)).collect()
    }
}

pub type BandGroups = BTreeMap<AcquisitionKey, BandSet>;

/// Group candidate paths by timestamp. Paths are visited in sorted order, so
/// when a band repeats for a timestamp the greatest path wins.
pub fn group_band_files<I: IntoIterator<Item = PathBuf>>(paths: I) -> BandGroups {
    let mut paths: Vec<PathBuf> = paths.into_iter().collect();
    paths.sort();

    let mut groups = BandGroups::new();
    for path in paths {
        let Some(parsed) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_band_file_name)
        else {
            debug!("Ignoring {:?}: name does not match band file pattern", path);
            continue;
        };
        debug!("{} {} band {} <- {:?}", parsed.satellite, parsed.key, parsed.band, path);
        let set = groups.entry(parsed.key.clone()).or_default();
        if let Some(previous) = set.insert(parsed.band.clone(), path.clone()) {
            warn!(
                "Duplicate {} band for {} ({}): {:?} replaces {:?}",
                parsed.band, parsed.key, parsed.satellite, path, previous
            );
        }
    }
    groups
}

/// Scan `dir` for rasters matching `pattern` and group them by timestamp.
pub fn group_directory(dir: &Path, pattern: &str) -> Result<BandGroups> {
    let files = list_matching(dir, pattern)?;
    Ok(group_band_files(files))
}
