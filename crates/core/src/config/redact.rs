//! Sensitivity filtering and display conversion for config entries.
//!
//! Two independent filters apply: a key is dropped outright when its
//! lowercase form contains any sensitive token, and a string value is dropped
//! when it looks path-like, even under a harmless key. Bare numeric fractions
//! like `"3/4"` are exempt from the path check.

use crate::records::FlatRecord;
use crate::value::format_value;
use serde_json::Value;
use std::collections::BTreeMap;

/// Tokens marking a config key as sensitive: paths, hosts,
/// credentials-adjacent metadata, experiment-tracking artifacts.
const SENSITIVE_KEY_TOKENS: &[&str] = &[
    "path",
    "dir",
    "file",
    "output",
    "log",
    "logging",
    "checkpoint",
    "ckpt",
    "save",
    "load",
    "resume",
    "artifact",
    "cache",
    "wandb",
    "tensorboard",
    "tb",
    "hostname",
    "host",
    "user",
    "username",
    "machine",
    "node",
    "slurm",
    "job",
];

/// Maximum list length rendered as a bracketed scalar list.
const MAX_LIST_ELEMENTS: usize = 10;

/// True when the key's lowercase form contains any sensitive token.
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEY_TOKENS.iter().any(|token| lower.contains(token))
}

/// True when a string value looks like a local or remote path.
pub fn looks_like_path_value(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    // A bare numeric fraction is not a path.
    if is_plain_fraction(trimmed) {
        return false;
    }
    if trimmed.contains("://") {
        return true;
    }
    if trimmed.starts_with('~')
        || trimmed.starts_with('/')
        || trimmed.starts_with("./")
        || trimmed.starts_with("../")
    {
        return true;
    }
    if has_drive_prefix(trimmed) {
        return true;
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return true;
    }
    let lower = trimmed.to_lowercase();
    lower.contains("/users/") || lower.contains("/home/")
}

fn is_plain_fraction(text: &str) -> bool {
    match text.split_once('/') {
        Some((numerator, denominator)) => {
            !numerator.is_empty()
                && !denominator.is_empty()
                && numerator.chars().all(|c| c.is_ascii_digit())
                && denominator.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn has_drive_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

/// Convert one config value to its display string, or `None` when the value
/// should be omitted.
///
/// Strings are trimmed and newline-collapsed (and dropped when path-like),
/// floats use the shared formatter, booleans render as literal words, short
/// lists of scalars render bracketed and comma-joined. Nested structures and
/// long lists are omitted entirely.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Bool(flag) => Some(if *flag { "true" } else { "false" }.to_string()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Some(uint.to_string())
            } else {
                number
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(format_value)
            }
        }
        Value::String(text) => {
            let collapsed = text.trim().replace('\n', " ");
            if collapsed.is_empty() || looks_like_path_value(&collapsed) {
                None
            } else {
                Some(collapsed)
            }
        }
        Value::Array(items)
            if items.len() <= MAX_LIST_ELEMENTS && items.iter().all(is_scalar) =>
        {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(format!("[{}]", parts.join(", ")))
            }
        }
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// The non-sensitive, displayable subset of a flattened config.
pub fn normalize_config(flat: &FlatRecord) -> BTreeMap<String, String> {
    flat.iter()
        .filter(|(key, _)| !is_sensitive_key(key))
        .filter_map(|(key, value)| display_value(value).map(|s| (key.clone(), s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sensitive_tokens_match_anywhere_in_key() {
        assert!(is_sensitive_key("checkpoint_dir"));
        assert!(is_sensitive_key("out_dir"));
        assert!(is_sensitive_key("WANDB_PROJECT"));
        assert!(is_sensitive_key("slurm_job_id"));
        assert!(!is_sensitive_key("lr"));
        assert!(!is_sensitive_key("seed"));
    }

    #[test]
    fn path_like_values_are_detected() {
        assert!(looks_like_path_value("/home/alice/run1"));
        assert!(looks_like_path_value("~/runs"));
        assert!(looks_like_path_value("./out"));
        assert!(looks_like_path_value("../out"));
        assert!(looks_like_path_value("C:\\data"));
        assert!(looks_like_path_value("s3://bucket/key"));
        assert!(looks_like_path_value("results\\latest"));
        assert!(looks_like_path_value("a/b"));
    }

    #[test]
    fn fractions_and_plain_strings_are_not_paths() {
        assert!(!looks_like_path_value("3/4"));
        assert!(!looks_like_path_value("  12/100  "));
        assert!(!looks_like_path_value("cosine"));
        assert!(!looks_like_path_value(""));
        // Only pure numeric fractions are exempt.
        assert!(looks_like_path_value("a/4"));
        assert!(looks_like_path_value("3/4/5"));
    }

    #[test]
    fn scalar_display_forms() {
        assert_eq!(display_value(&json!(true)), Some("true".to_string()));
        assert_eq!(display_value(&json!(false)), Some("false".to_string()));
        assert_eq!(display_value(&json!(42)), Some("42".to_string()));
        assert_eq!(display_value(&json!(0.001)), Some("0.001".to_string()));
        assert_eq!(display_value(&json!(" adam \n beta ")), Some("adam  beta".to_string()));
    }

    #[test]
    fn path_like_string_values_are_omitted() {
        assert_eq!(display_value(&json!("/home/alice/run1")), None);
        assert_eq!(display_value(&json!("3/4")), Some("3/4".to_string()));
    }

    #[test]
    fn short_scalar_lists_render_bracketed() {
        assert_eq!(
            display_value(&json!([1, 2, 3])),
            Some("[1, 2, 3]".to_string())
        );
        assert_eq!(
            display_value(&json!(["a", true, 0.5])),
            Some("[a, true, 0.5]".to_string())
        );
        // Lists that filter down to nothing are omitted.
        assert_eq!(display_value(&json!(["/home/x", "/home/y"])), None);
    }

    #[test]
    fn long_lists_and_nested_values_are_omitted() {
        let long: Vec<i32> = (0..11).collect();
        assert_eq!(display_value(&json!(long)), None);
        assert_eq!(display_value(&json!({"a": 1})), None);
        assert_eq!(display_value(&json!([[1], [2]])), None);
        assert_eq!(display_value(&json!(null)), None);
    }

    #[test]
    fn normalize_drops_sensitive_keys_and_path_values() {
        let mut flat = FlatRecord::new();
        flat.insert("lr".to_string(), json!(0.01));
        flat.insert("seed".to_string(), json!(1));
        flat.insert("out_dir".to_string(), json!("runs/latest"));
        flat.insert("data_root".to_string(), json!("/data/imagenet"));
        flat.insert("experiment".to_string(), json!("/home/alice/exp"));

        let normalized = normalize_config(&flat);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized["lr"], "0.01");
        assert_eq!(normalized["seed"], "1");
    }
}
