//! Size-capped config file loading.
//!
//! Supported formats are JSON and TOML only. A file over the byte cap is
//! skipped whole (never partially parsed), and every failure mode degrades
//! to a warning plus an empty result.

use crate::records::{file_label, flatten_object, FlatRecord};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read and flatten a single config file.
///
/// The byte cap is checked against file metadata before any bytes are read.
/// TOML values are bridged into `serde_json::Value` so flattening and display
/// conversion share one representation with JSON configs.
pub fn read_config(path: &Path, max_bytes: u64) -> (FlatRecord, Vec<String>) {
    let label = file_label(path);

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            return (
                FlatRecord::new(),
                vec![format!("failed to stat config '{label}': {err}")],
            )
        }
    };
    if size > max_bytes {
        return (
            FlatRecord::new(),
            vec![format!("skipped config >{max_bytes} bytes: {label} ({size} bytes)")],
        );
    }

    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) => {
            return (
                FlatRecord::new(),
                vec![format!("failed to read config '{label}': {err}")],
            )
        }
    };

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "json" => parse_json(&raw, &label),
        "toml" => parse_toml(&raw, &label),
        _ => (
            FlatRecord::new(),
            vec![format!(
                "unsupported config type (expected .json or .toml): {label}"
            )],
        ),
    }
}

fn parse_json(raw: &[u8], label: &str) -> (FlatRecord, Vec<String>) {
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(err) => {
            return (
                FlatRecord::new(),
                vec![format!("failed to decode json config '{label}': {err}")],
            )
        }
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => (flatten_object(&object), Vec::new()),
        Ok(_) => (
            FlatRecord::new(),
            vec![format!("json config is not an object: {label}")],
        ),
        Err(err) => (
            FlatRecord::new(),
            vec![format!("failed to parse json config '{label}': {err}")],
        ),
    }
}

fn parse_toml(raw: &[u8], label: &str) -> (FlatRecord, Vec<String>) {
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(err) => {
            return (
                FlatRecord::new(),
                vec![format!("failed to decode toml config '{label}': {err}")],
            )
        }
    };
    let table = match text.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            return (
                FlatRecord::new(),
                vec![format!("failed to parse toml config '{label}': {err}")],
            )
        }
    };
    (flatten_object(&toml_table_to_json(table)), Vec::new())
}

fn toml_table_to_json(table: toml::Table) -> Map<String, Value> {
    table
        .into_iter()
        .filter_map(|(key, value)| toml_to_json(value).map(|value| (key, value)))
        .collect()
}

/// Bridge one TOML value into JSON. Datetimes have no JSON counterpart
/// (serde would smuggle them through as a private wrapper object) and are
/// omitted, as are non-finite floats.
fn toml_to_json(value: toml::Value) -> Option<Value> {
    match value {
        toml::Value::String(text) => Some(Value::String(text)),
        toml::Value::Integer(int) => Some(Value::from(int)),
        toml::Value::Float(float) => serde_json::Number::from_f64(float).map(Value::Number),
        toml::Value::Boolean(flag) => Some(Value::Bool(flag)),
        toml::Value::Datetime(_) => None,
        toml::Value::Array(items) => Some(Value::Array(
            items.into_iter().filter_map(toml_to_json).collect(),
        )),
        toml::Value::Table(table) => Some(Value::Object(toml_table_to_json(table))),
    }
}
