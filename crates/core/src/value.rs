//! Numeric coercion and display formatting.
//!
//! Both timeseries extraction and config normalization funnel through these
//! two functions so that "numeric" and "how a number looks" mean the same
//! thing everywhere in the pipeline.

use serde_json::Value;

/// Best-effort conversion of a JSON value to a finite float.
///
/// One branch per input kind: booleans are never numeric, numbers must be
/// finite, strings are parsed after trimming whitespace. Everything else is
/// not numeric. Never panics.
pub fn coerce_finite(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(_) => None,
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

/// Parse a string to a finite float after stripping whitespace.
pub fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Stable, copy/paste-friendly display form of a float.
///
/// Magnitudes >= 10_000 or in (0, 0.001) use scientific notation with three
/// fractional digits; magnitudes >= 100 keep two fractional digits; everything
/// else keeps up to four with trailing zeros and a trailing point stripped.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 10_000.0 || (magnitude > 0.0 && magnitude < 0.001) {
        return format!("{value:.3e}");
    }
    if magnitude >= 100.0 {
        return format!("{value:.2}");
    }
    let rendered = format!("{value:.4}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booleans_are_never_numeric() {
        assert_eq!(coerce_finite(&json!(true)), None);
        assert_eq!(coerce_finite(&json!(false)), None);
    }

    #[test]
    fn numbers_coerce_when_finite() {
        assert_eq!(coerce_finite(&json!(3)), Some(3.0));
        assert_eq!(coerce_finite(&json!(-0.5)), Some(-0.5));
        assert_eq!(coerce_finite(&json!(1_000_000_000_u64)), Some(1e9));
    }

    #[test]
    fn strings_parse_after_trimming() {
        assert_eq!(coerce_finite(&json!("  2.5 ")), Some(2.5));
        assert_eq!(coerce_finite(&json!("1e-3")), Some(0.001));
        assert_eq!(coerce_finite(&json!("")), None);
        assert_eq!(coerce_finite(&json!("   ")), None);
        assert_eq!(coerce_finite(&json!("abc")), None);
        assert_eq!(coerce_finite(&json!("nan")), None);
        assert_eq!(coerce_finite(&json!("inf")), None);
    }

    #[test]
    fn structured_values_are_not_numeric() {
        assert_eq!(coerce_finite(&json!(null)), None);
        assert_eq!(coerce_finite(&json!([1, 2])), None);
        assert_eq!(coerce_finite(&json!({"a": 1})), None);
    }

    #[test]
    fn large_and_tiny_magnitudes_use_scientific() {
        assert_eq!(format_value(25_000.0), "2.500e4");
        assert_eq!(format_value(-25_000.0), "-2.500e4");
        assert_eq!(format_value(0.0005), "5.000e-4");
    }

    #[test]
    fn mid_magnitudes_keep_two_digits() {
        assert_eq!(format_value(123.456), "123.46");
        assert_eq!(format_value(9_999.5), "9999.50");
    }

    #[test]
    fn small_magnitudes_strip_trailing_zeros() {
        assert_eq!(format_value(0.01), "0.01");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(2.0), "2");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(0.12345), "0.1235");
    }
}
