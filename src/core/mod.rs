//! Core processing building blocks: filename grouping, band stacking,
//! resampling, normalization and sequence windows, plus the shared
//! configuration and shape records. These are primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
pub mod schema;
