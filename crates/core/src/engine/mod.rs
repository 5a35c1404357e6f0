//! Report build engine.
//!
//! The ReportEngine owns the whole pipeline: it ingests each run directory
//! independently (discovery, config, timeseries, summary, images), then runs
//! the two global selection passes once every run record exists, and hands
//! back a finalized [`Report`].

pub mod error;

pub use error::EngineError;

use crate::config::{normalize_config, read_config};
use crate::discover::{classify_files, scan_files};
use crate::records::{file_label, read_summary_json, read_timeseries};
use crate::select::overrides::NormalizedConfig;
use crate::select::{compute_overrides, resolve_baseline, select_metrics, select_override_keys};
use crate::series::build_series;
use chrono::Utc;
use rr_protocol::{BaselineInfo, IngestLimits, IngestStage, Report, RunRecord};
use std::path::{Path, PathBuf};

/// Caller-facing knobs for one report build.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Explicit metric names; empty means heuristic selection.
    pub metrics: Vec<String>,
    /// Baseline reference: a 1-based run index or a run directory name.
    pub base_run: Option<String>,
    /// Resource caps applied during ingestion.
    pub limits: IngestLimits,
}

/// The main report build engine.
pub struct ReportEngine {
    options: ReportOptions,
}

impl ReportEngine {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Ingest every run directory and build the finalized report.
    ///
    /// Per-run ingestion is independent; the metric and config-key selection
    /// passes run only after every run's record (including its warnings) is
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns an error if no run directory was given, a run path is not a
    /// directory, or an explicit baseline reference does not resolve. All
    /// per-file trouble inside a run degrades to warnings on that run's
    /// record instead.
    pub fn build_report(&self, run_dirs: &[PathBuf]) -> Result<Report, EngineError> {
        if run_dirs.is_empty() {
            return Err(EngineError::NoRuns);
        }

        let mut runs: Vec<RunRecord> = Vec::with_capacity(run_dirs.len());
        let mut configs: Vec<NormalizedConfig> = Vec::with_capacity(run_dirs.len());
        for (idx, dir) in run_dirs.iter().enumerate() {
            let index = idx + 1;
            if !dir.is_dir() {
                return Err(EngineError::RunDirNotFound {
                    index,
                    path: dir.clone(),
                });
            }
            let (record, config) = self.ingest_run(index, dir);
            runs.push(record);
            configs.push(config);
        }

        // Global selection: both passes observe the complete set of records.
        let run_names: Vec<String> = runs.iter().map(|r| r.source_dir_name.clone()).collect();
        let base_idx = resolve_baseline(&run_names, &configs, self.options.base_run.as_deref())?;
        let base_config = base_idx
            .map(|i| configs[i].clone())
            .unwrap_or_default();

        let config_keys =
            select_override_keys(&configs, &base_config, self.options.limits.max_config_keys);
        let baseline = base_idx.map(|i| BaselineInfo {
            run_index: i,
            run_name: runs[i].name.clone(),
            config: config_keys
                .iter()
                .map(|k| (k.clone(), base_config.get(k).cloned().unwrap_or_default()))
                .collect(),
        });

        if !config_keys.is_empty() {
            for (record, config) in runs.iter_mut().zip(&configs) {
                if config.is_empty() {
                    continue;
                }
                record.config_summary = config_keys
                    .iter()
                    .filter_map(|k| config.get(k).map(|v| (k.clone(), v.clone())))
                    .collect();
                if base_idx.is_some() {
                    record.overrides = compute_overrides(config, &base_config, &config_keys);
                }
            }
        }

        let metrics = select_metrics(&runs, &self.options.metrics, self.options.limits.max_metrics);

        for record in &mut runs {
            record.advance_stage(IngestStage::Finalized);
            for warning in &record.warnings {
                tracing::warn!(run = %record.name, "{warning}");
            }
        }

        Ok(Report {
            generated_at: Utc::now(),
            runs,
            metrics,
            config_keys,
            baseline,
        })
    }

    /// Build one run's record plus its normalized config.
    ///
    /// Stages run in a fixed order and each is skipped when no file of that
    /// kind was discovered; skipping never blocks a later stage.
    fn ingest_run(&self, index: usize, dir: &Path) -> (RunRecord, NormalizedConfig) {
        let limits = &self.options.limits;
        let mut record = RunRecord::new(format!("run_{index:02}"), dir.to_path_buf());

        let files = scan_files(dir, limits.max_files);
        let run_files = classify_files(dir, &files);

        let mut config = NormalizedConfig::new();
        if let Some(path) = &run_files.config {
            record.config_path = Some(file_label(path));
            record.config_type = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .filter(|e| !e.is_empty());
            let (flat, warnings) = read_config(path, limits.max_config_bytes);
            record.warnings.extend(warnings);
            config = normalize_config(&flat);
            record.advance_stage(IngestStage::ConfigIngested);
        }

        if let Some(path) = &run_files.timeseries {
            record.metrics_timeseries_path = Some(file_label(path));
            let (rows, warnings) = read_timeseries(path, limits.max_records);
            record.warnings.extend(warnings);
            let set = build_series(&rows, limits.max_points);
            record.series = set.series;
            record.finals = set.finals;
            record.step_key = set.step_key;
            record.n_records = Some(set.n_records);
            if record.finals.is_empty() {
                record.warnings.push(format!(
                    "no numeric metrics extracted from timeseries: {}",
                    file_label(path)
                ));
            }
            record.advance_stage(IngestStage::TimeseriesIngested);
        }

        if let Some(path) = &run_files.summary {
            record.metrics_summary_path = Some(file_label(path));
            let (summary, warnings) = read_summary_json(path);
            record.warnings.extend(warnings);
            // Timeseries finals win over summary values for the same name.
            for (name, value) in summary {
                record.finals.entry(name).or_insert(value);
            }
            record.advance_stage(IngestStage::SummaryIngested);
        }

        if !run_files.images.is_empty() {
            record.images = run_files
                .images
                .into_iter()
                .take(limits.max_images)
                .collect();
            record.advance_stage(IngestStage::ImagesIngested);
        }

        if run_files.timeseries.is_none() && run_files.summary.is_none() {
            record.warnings.push(
                "no metrics files discovered (expected metrics/history/progress jsonl/csv or summary/results/eval json)"
                    .to_string(),
            );
        }

        (record, config)
    }
}
