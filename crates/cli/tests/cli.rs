use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn runreport() -> Command {
    Command::cargo_bin("runreport").expect("binary builds")
}

fn run_dir_with_metrics() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("metrics.jsonl"),
        "{\"step\": 1, \"loss\": 2.0}\n{\"step\": 2, \"loss\": 1.5}\n",
    )
    .expect("write metrics");
    fs::write(
        dir.path().join("config.json"),
        "{\"lr\": 0.001, \"seed\": 7}",
    )
    .expect("write config");
    dir
}

#[test]
fn requires_at_least_one_run() {
    runreport()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--run"));
}

#[test]
fn missing_run_dir_fails_with_index() {
    runreport()
        .arg("--run")
        .arg("/nonexistent/run/dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run path is not a directory (run #1)"));
}

#[test]
fn json_report_goes_to_stdout() {
    let dir = run_dir_with_metrics();
    let output = runreport()
        .arg("--run")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(report["runs"][0]["name"], "run_01");
    assert_eq!(report["runs"][0]["finals"]["loss"], 1.5);
    assert_eq!(report["metrics"][0], "loss");
    assert!(report["runs"][0].get("path").is_none());
}

#[test]
fn markdown_format_renders_tables() {
    let dir = run_dir_with_metrics();
    runreport()
        .arg("--run")
        .arg(dir.path())
        .arg("--format")
        .arg("md")
        .assert()
        .success()
        .stdout(predicate::str::contains("| metric | run_01 |"))
        .stdout(predicate::str::contains("| loss | 1.5 |"));
}

#[test]
fn unknown_format_falls_back_to_json() {
    let dir = run_dir_with_metrics();
    let assert = runreport()
        .arg("--run")
        .arg(dir.path())
        .arg("--format")
        .arg("html")
        .assert()
        .success()
        .stderr(predicate::str::contains("falling back to json"));
    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(report["runs"][0]["name"], "run_01");
}

#[test]
fn out_flag_writes_the_report_file() {
    let dir = run_dir_with_metrics();
    let out = TempDir::new().expect("tempdir");
    let path = out.path().join("report.json");
    runreport()
        .arg("--run")
        .arg(dir.path())
        .arg("--out")
        .arg(&path)
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_slice(&fs::read(&path).expect("file written")).expect("valid json");
    assert_eq!(report["metrics"][0], "loss");
}

#[test]
fn warnings_surface_on_stderr() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "no metrics here").expect("write");
    runreport()
        .arg("--run")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("no metrics files discovered"));
}

#[test]
fn bad_baseline_reference_is_an_error() {
    let dir = run_dir_with_metrics();
    runreport()
        .arg("--run")
        .arg(dir.path())
        .arg("--base-run")
        .arg("9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-run index out of range: 9"));
}

#[test]
fn explicit_metrics_and_caps_are_honored() {
    let dir = run_dir_with_metrics();
    let output = runreport()
        .arg("--run")
        .arg(dir.path())
        .arg("--metric")
        .arg("loss")
        .arg("--metric")
        .arg("custom")
        .arg("--max-points")
        .arg("1")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(report["metrics"][0], "loss");
    assert_eq!(report["metrics"][1], "custom");
    assert_eq!(report["runs"][0]["series"]["loss"].as_array().unwrap().len(), 1);
}
