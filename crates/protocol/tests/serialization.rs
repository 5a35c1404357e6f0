//! Serialization round-trip tests for the shared data models.
//!
//! These tests verify that the report output contract is stable JSON and
//! that internal-only fields (local paths, ingestion stage) stay internal.

use rr_protocol::{BaselineInfo, IngestStage, Report, RunRecord, SeriesPoint};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn sample_run() -> RunRecord {
    let mut run = RunRecord::new("run_01", PathBuf::from("/home/ci/runs/ppo-seed1"));
    run.config_path = Some("config.json".to_string());
    run.config_type = Some("json".to_string());
    run.config_summary
        .insert("lr".to_string(), "0.001".to_string());
    run.metrics_timeseries_path = Some("metrics.jsonl".to_string());
    run.step_key = Some("step".to_string());
    run.n_records = Some(2);
    run.series.insert(
        "loss".to_string(),
        vec![SeriesPoint::new(1.0, 2.0), SeriesPoint::new(2.0, 1.0)],
    );
    run.finals.insert("loss".to_string(), 1.0);
    run.warnings.push("example warning".to_string());
    run.images.push(PathBuf::from("/home/ci/runs/plots/a.png"));
    run.advance_stage(IngestStage::ImagesIngested);
    run
}

#[test]
fn run_record_round_trips() {
    let run = sample_run();
    let json = serde_json::to_string(&run).expect("serialize run record");
    let back: RunRecord = serde_json::from_str(&json).expect("deserialize run record");

    assert_eq!(back.name, "run_01");
    assert_eq!(back.config_path.as_deref(), Some("config.json"));
    assert_eq!(back.step_key.as_deref(), Some("step"));
    assert_eq!(back.n_records, Some(2));
    assert_eq!(back.series["loss"].len(), 2);
    assert_eq!(back.finals["loss"], 1.0);
    assert_eq!(back.warnings.len(), 1);
}

#[test]
fn internal_fields_are_not_serialized() {
    let run = sample_run();
    let json = serde_json::to_string(&run).expect("serialize run record");

    assert!(!json.contains("/home/ci"), "local paths must not appear");
    assert!(!json.contains("ppo-seed1"), "source dir name must not appear");
    assert!(!json.contains("images_ingested"), "stage is internal");
}

#[test]
fn report_round_trips() {
    let mut baseline_config = BTreeMap::new();
    baseline_config.insert("lr".to_string(), "0.001".to_string());
    baseline_config.insert("seed".to_string(), String::new());

    let report = Report {
        generated_at: chrono::Utc::now(),
        runs: vec![sample_run()],
        metrics: vec!["loss".to_string()],
        config_keys: vec!["lr".to_string(), "seed".to_string()],
        baseline: Some(BaselineInfo {
            run_index: 0,
            run_name: "run_01".to_string(),
            config: baseline_config,
        }),
    };

    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    let back: Report = serde_json::from_str(&json).expect("deserialize report");

    assert_eq!(back.runs.len(), 1);
    assert_eq!(back.metrics, vec!["loss"]);
    assert_eq!(back.config_keys.len(), 2);
    let baseline = back.baseline.expect("baseline should survive round trip");
    assert_eq!(baseline.run_index, 0);
    assert_eq!(baseline.config["seed"], "");
}

#[test]
fn series_point_json_shape() {
    let point = SeriesPoint::new(3.0, 0.25);
    let json = serde_json::to_value(point).expect("serialize point");
    assert_eq!(json["x"], 3.0);
    assert_eq!(json["y"], 0.25);
}
