//! # rr-core
//!
//! Run-artifact ingestion and metrics aggregation for run-report.
//!
//! This crate turns loosely-structured experiment run directories into a
//! normalized, comparable data model: per-run numeric time series, final
//! values, condensed configuration, and cross-run baseline/override diffs.
//! It tolerates arbitrary, partially-malformed input and never aborts the
//! overall report because one run or one file is bad.
//!
//! ## Modules
//!
//! - [`discover`]: bounded directory walk and candidate file classification
//! - [`records`]: JSONL/CSV record readers and key-path flattening
//! - [`config`]: size-capped JSON/TOML config loading and redaction
//! - [`series`]: step-key resolution, series construction, downsampling
//! - [`select`]: metric/config-key ranking and baseline override resolution
//! - [`engine`]: per-run ingestion plus the global selection barrier
//! - [`value`]: numeric coercion and the shared display formatter

pub mod config;
pub mod discover;
pub mod engine;
pub mod records;
pub mod select;
pub mod series;
pub mod value;
