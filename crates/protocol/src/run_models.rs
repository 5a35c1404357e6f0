//! Per-run record models.
//!
//! A [`RunRecord`] is created once per input run directory and mutated through
//! the ingestion stages in order (config, timeseries, summary, images). Once
//! global selection has run it is read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One point of a metric time series.
///
/// `x` is the step value (or positional index when no step key resolved),
/// `y` is the metric value at that step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Linear ingestion stage of a run record.
///
/// Transitions only move forward; a stage with no matching file is skipped
/// without blocking later stages. No stage can revert an earlier one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    #[default]
    Created,
    ConfigIngested,
    TimeseriesIngested,
    SummaryIngested,
    ImagesIngested,
    Finalized,
}

/// Everything extracted from one run directory.
///
/// Fields holding local filesystem paths are never serialized: the report
/// output must not leak the machine's directory layout. Discovered file
/// identities are recorded as bare file names only.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunRecord {
    /// Public label used in the report (e.g. `run_01`). Never a local dir name.
    pub name: String,

    /// Internal: run directory, used for IO only.
    #[serde(skip)]
    pub path: PathBuf,

    /// Internal: original directory name, used only to match `--base-run`.
    #[serde(skip)]
    pub source_dir_name: String,

    /// File name of the discovered config file, if any.
    pub config_path: Option<String>,

    /// Config format (`json` or `toml`), if a config file was discovered.
    pub config_type: Option<String>,

    /// Selected config key -> display string. Non-sensitive, non-path-like only.
    pub config_summary: BTreeMap<String, String>,

    /// Config key -> display string, for keys differing from the baseline run.
    pub overrides: BTreeMap<String, String>,

    /// File name of the discovered timeseries file, if any.
    pub metrics_timeseries_path: Option<String>,

    /// File name of the discovered summary file, if any.
    pub metrics_summary_path: Option<String>,

    /// x-axis field used for series; `None` means positional index.
    pub step_key: Option<String>,

    /// Number of parsed timeseries records (after truncation).
    pub n_records: Option<usize>,

    /// Metric name -> ordered points, insertion order = time order.
    pub series: BTreeMap<String, Vec<SeriesPoint>>,

    /// Metric name -> last known numeric value.
    pub finals: BTreeMap<String, f64>,

    /// Internal: ranked image candidate paths for the rendering layer.
    #[serde(skip)]
    pub images: Vec<PathBuf>,

    /// Human-readable degradation notices, in the order they occurred.
    pub warnings: Vec<String>,

    /// Current ingestion stage.
    #[serde(skip)]
    pub stage: IngestStage,
}

impl RunRecord {
    /// Create a fresh record in the `Created` stage.
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        let source_dir_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name: name.into(),
            path,
            source_dir_name,
            ..Self::default()
        }
    }

    /// Advance to a later ingestion stage.
    ///
    /// Skipped stages are fine (transitions are linear but stages are
    /// optional); moving backwards is not and is ignored.
    pub fn advance_stage(&mut self, stage: IngestStage) {
        if stage > self.stage {
            self.stage = stage;
        }
    }
}
