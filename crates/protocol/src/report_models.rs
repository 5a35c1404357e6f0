//! Finalized cross-run report models.
//!
//! A [`Report`] is the complete output contract of the ingestion pipeline:
//! the rendering layer only needs read access to these values and must not
//! re-derive any ingestion decision.

use crate::run_models::RunRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity and config snapshot of the baseline run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BaselineInfo {
    /// Zero-based index into `Report::runs`.
    pub run_index: usize,

    /// Public label of the baseline run.
    pub run_name: String,

    /// Selected config key -> baseline display string.
    ///
    /// Keys the baseline lacks map to an empty string so the rendering layer
    /// can show a fixed-width key column without re-deriving anything.
    pub config: BTreeMap<String, String>,
}

/// The finalized report: all run records plus the global selection state.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Report {
    /// UTC timestamp of report generation.
    pub generated_at: DateTime<Utc>,

    /// One record per input run directory, in input order.
    pub runs: Vec<RunRecord>,

    /// Selected metric names; order is display order.
    pub metrics: Vec<String>,

    /// Selected config keys shown in baseline/override tables.
    pub config_keys: Vec<String>,

    /// Baseline run identity and config snapshot, if one was resolved.
    pub baseline: Option<BaselineInfo>,
}
