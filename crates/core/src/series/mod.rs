//! Time series construction from flattened records.
//!
//! Resolves a step/x-axis key by priority, builds one series per numeric
//! field, downsamples each to the point cap, and derives a final value per
//! metric from the series tail.

use crate::records::FlatRecord;
use crate::value::coerce_finite;
use rr_protocol::SeriesPoint;
use std::collections::BTreeMap;

/// Candidate step keys, in priority order. The first key present in at least
/// one record with a numeric value wins.
pub const STEP_KEYS: &[&str] = &[
    "_step",
    "step",
    "global_step",
    "timestep",
    "timesteps",
    "iteration",
    "iter",
    "epoch",
    "_runtime",
    "time",
];

/// Everything derived from one run's timeseries records.
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    /// Metric name -> points, already downsampled.
    pub series: BTreeMap<String, Vec<SeriesPoint>>,
    /// Metric name -> y-value of the last point.
    pub finals: BTreeMap<String, f64>,
    /// The resolved x-axis key; `None` means positional index was used.
    pub step_key: Option<String>,
    /// Number of input records.
    pub n_records: usize,
}

/// Pick the step key: first priority-list key that is numeric somewhere.
pub fn resolve_step_key(records: &[FlatRecord]) -> Option<&'static str> {
    STEP_KEYS.iter().copied().find(|key| {
        records
            .iter()
            .any(|record| record.get(*key).and_then(coerce_finite).is_some())
    })
}

/// Deterministic stride downsampling to at most `max_points` points.
///
/// The last output point is forced to equal the true last input point, so the
/// most recent value is always visible regardless of stride rounding.
pub fn downsample(points: Vec<SeriesPoint>, max_points: usize) -> Vec<SeriesPoint> {
    if points.len() <= max_points {
        return points;
    }
    let stride = points.len() as f64 / max_points as f64;
    let mut out: Vec<SeriesPoint> = (0..max_points)
        .map(|i| points[((i as f64 * stride) as usize).min(points.len() - 1)])
        .collect();
    if let (Some(last_out), Some(last_in)) = (out.last_mut(), points.last()) {
        if last_out != last_in {
            *last_out = *last_in;
        }
    }
    out
}

/// Build per-metric series and finals from flattened records.
///
/// Keys beginning with `_` (other than the resolved step key) and keys ending
/// in `/_` are excluded from metric extraction. Non-numeric values are
/// discarded per metric/record pair.
pub fn build_series(records: &[FlatRecord], max_points: usize) -> SeriesSet {
    if records.is_empty() {
        return SeriesSet::default();
    }

    let step_key = resolve_step_key(records);
    let mut raw_series: BTreeMap<String, Vec<SeriesPoint>> = BTreeMap::new();

    for (idx, record) in records.iter().enumerate() {
        let x = step_key
            .and_then(|key| record.get(key))
            .and_then(coerce_finite)
            .unwrap_or(idx as f64);
        for (key, raw) in record {
            if Some(key.as_str()) == step_key {
                continue;
            }
            if key.starts_with('_') || key.ends_with("/_") {
                continue;
            }
            let Some(y) = coerce_finite(raw) else { continue };
            raw_series
                .entry(key.clone())
                .or_default()
                .push(SeriesPoint::new(x, y));
        }
    }

    let mut series = BTreeMap::new();
    let mut finals = BTreeMap::new();
    for (key, points) in raw_series {
        let points = downsample(points, max_points);
        if let Some(last) = points.last() {
            finals.insert(key.clone(), last.y);
            series.insert(key, points);
        }
    }

    SeriesSet {
        series,
        finals,
        step_key: step_key.map(str::to_string),
        n_records: records.len(),
    }
}
