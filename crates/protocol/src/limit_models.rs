//! Resource caps bounding every stage of ingestion.
//!
//! All bounding is structural: each cap is enforced before unbounded work is
//! attempted (file size is checked before reading bytes, record counts while
//! streaming). Exceeding a cap degrades to a warning, never an error.

use serde::{Deserialize, Serialize};

/// Caps applied during run ingestion.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct IngestLimits {
    /// Maximum number of files enumerated per run directory.
    pub max_files: usize,

    /// Maximum timeseries records read per metrics file.
    pub max_records: usize,

    /// Maximum points kept per metric series after downsampling.
    pub max_points: usize,

    /// Maximum metrics selected for the report.
    pub max_metrics: usize,

    /// Maximum config file size in bytes; larger files are skipped whole.
    pub max_config_bytes: u64,

    /// Maximum config keys selected for baseline/override display.
    pub max_config_keys: usize,

    /// Maximum image candidates kept per run.
    pub max_images: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_files: 20_000,
            max_records: 200_000,
            max_points: 2_000,
            max_metrics: 8,
            max_config_bytes: 512 * 1024,
            max_config_keys: 12,
            max_images: 12,
        }
    }
}
