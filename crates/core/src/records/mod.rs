//! Record readers for timeseries and summary files.
//!
//! JSONL and CSV files become flattened key -> value records, bounded by a
//! record cap. Malformed individual lines/rows are skipped silently; file
//! level failures degrade to a warning and an empty result, never an error
//! that escapes the run.

use crate::value::coerce_finite;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One flattened record: nested objects become `/`-joined key paths.
pub type FlatRecord = BTreeMap<String, Value>;

/// Flatten a JSON object; non-object children are not further flattened.
pub fn flatten_object(object: &Map<String, Value>) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(object, "", &mut out);
    out
}

fn flatten_into(object: &Map<String, Value>, prefix: &str, out: &mut FlatRecord) {
    for (key, value) in object {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}/{key}")
        };
        match value {
            Value::Object(child) => flatten_into(child, &full, out),
            other => {
                out.insert(full, other.clone());
            }
        }
    }
}

/// Read a timeseries file, dispatching on extension (`.jsonl` or CSV).
pub fn read_timeseries(path: &Path, max_records: usize) -> (Vec<FlatRecord>, Vec<String>) {
    let is_jsonl = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase() == "jsonl")
        .unwrap_or(false);
    if is_jsonl {
        read_jsonl(path, max_records)
    } else {
        read_csv(path, max_records)
    }
}

/// Read a JSON Lines file into flattened records, capped at `max_records`.
///
/// Lines that are blank or fail to parse are skipped; non-object lines are
/// ignored. Reaching the cap emits a truncation warning naming the file and
/// the limit.
pub fn read_jsonl(path: &Path, max_records: usize) -> (Vec<FlatRecord>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut records = Vec::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warnings.push(format!(
                "failed to read metrics jsonl '{}': {err}",
                file_label(path)
            ));
            return (records, warnings);
        }
    };

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        if idx >= max_records {
            warnings.push(format!(
                "metrics file truncated at {max_records} records: {}",
                file_label(path)
            ));
            break;
        }
        let Ok(line) = line else { continue };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if let Value::Object(object) = value {
            records.push(flatten_object(&object));
        }
    }
    (records, warnings)
}

/// Read a CSV file with a header row into string-valued records, capped at
/// `max_records`. Rows that fail to parse are skipped.
pub fn read_csv(path: &Path, max_records: usize) -> (Vec<FlatRecord>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut records = Vec::new();

    let mut reader = match csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(err) => {
            warnings.push(format!(
                "failed to read metrics csv '{}': {err}",
                file_label(path)
            ));
            return (records, warnings);
        }
    };

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            warnings.push(format!(
                "failed to read metrics csv '{}': {err}",
                file_label(path)
            ));
            return (records, warnings);
        }
    };

    for (idx, result) in reader.records().enumerate() {
        if idx >= max_records {
            warnings.push(format!(
                "metrics file truncated at {max_records} records: {}",
                file_label(path)
            ));
            break;
        }
        let Ok(row) = result else { continue };
        let record: FlatRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(key, field)| (key.to_string(), Value::String(field.to_string())))
            .collect();
        records.push(record);
    }
    (records, warnings)
}

/// Read a summary JSON file: all finite numeric leaves whose flattened key
/// does not start with `_` become candidate final-only metrics.
pub fn read_summary_json(path: &Path) -> (BTreeMap<String, f64>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut out = BTreeMap::new();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warnings.push(format!(
                "failed to read summary json '{}': {err}",
                file_label(path)
            ));
            return (out, warnings);
        }
    };
    let value = match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(format!(
                "failed to parse summary json '{}': {err}",
                file_label(path)
            ));
            return (out, warnings);
        }
    };

    if let Value::Object(object) = value {
        for (key, raw) in flatten_object(&object) {
            if key.starts_with('_') {
                continue;
            }
            if let Some(parsed) = coerce_finite(&raw) {
                out.insert(key, parsed);
            }
        }
    }

    if out.is_empty() {
        warnings.push(format!(
            "no numeric fields found in summary json: {}",
            file_label(path)
        ));
    }
    (out, warnings)
}

/// File name for warning messages; never the full local path.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<unnamed>".to_string())
}
