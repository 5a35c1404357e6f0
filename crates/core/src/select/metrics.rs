//! Metric list selection.

use super::score::score_metric;
use rr_protocol::RunRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Pick the metric names to report, at most `max_metrics` of them.
///
/// An explicit non-empty list wins outright: order preserved, duplicates
/// removed, no ranking applied. Otherwise metrics are ranked by coverage
/// (how many runs have a final value for the name) descending, then heuristic
/// score descending, then name ascending for determinism.
pub fn select_metrics(runs: &[RunRecord], explicit: &[String], max_metrics: usize) -> Vec<String> {
    if !explicit.is_empty() {
        let mut seen = Vec::new();
        for name in explicit {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        seen.truncate(max_metrics);
        return seen;
    }

    let mut coverage: BTreeMap<&str, usize> = BTreeMap::new();
    for run in runs {
        for name in run.finals.keys() {
            *coverage.entry(name).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = coverage.into_iter().collect();
    ranked.sort_by(|(a_name, a_cov), (b_name, b_cov)| {
        b_cov
            .cmp(a_cov)
            .then_with(|| {
                score_metric(b_name)
                    .partial_cmp(&score_metric(a_name))
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a_name.cmp(b_name))
    });
    ranked.truncate(max_metrics);
    ranked.into_iter().map(|(name, _)| name.to_string()).collect()
}
