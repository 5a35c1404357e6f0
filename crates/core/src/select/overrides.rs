//! Baseline resolution and config override computation.

use super::score::score_config_key;
use crate::engine::EngineError;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// A run's normalized config: flattened key to display string.
pub type NormalizedConfig = BTreeMap<String, String>;

/// Resolve the baseline run index.
///
/// An explicit reference is either a 1-based run index or a run directory
/// name; a reference that resolves to nothing is an error. Without a
/// reference the first run with a non-empty config is the baseline. Either
/// way, a baseline whose config turned out empty is demoted to no baseline,
/// since there is nothing to diff against.
pub fn resolve_baseline(
    run_names: &[String],
    configs: &[NormalizedConfig],
    reference: Option<&str>,
) -> Result<Option<usize>, EngineError> {
    let index = match reference.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) if raw.chars().all(|c| c.is_ascii_digit()) => {
            let candidate = raw
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|i| *i < run_names.len());
            match candidate {
                Some(i) => Some(i),
                None => {
                    return Err(EngineError::BaselineOutOfRange {
                        reference: raw.to_string(),
                    })
                }
            }
        }
        Some(raw) => match run_names.iter().position(|name| name == raw) {
            Some(i) => Some(i),
            None => {
                return Err(EngineError::BaselineNotFound {
                    reference: raw.to_string(),
                })
            }
        },
        None => configs.iter().position(|cfg| !cfg.is_empty()),
    };

    Ok(index.filter(|i| configs.get(*i).is_some_and(|cfg| !cfg.is_empty())))
}

/// Rank config keys by how well they explain differences between runs.
///
/// Considers the union of keys across all configs. A run missing a key does
/// not count as a difference. Ranking is (has any difference, difference
/// count, heuristic key score) descending with name ascending as the final
/// tie-break, truncated to `max_keys`.
pub fn select_override_keys(
    configs: &[NormalizedConfig],
    base_config: &NormalizedConfig,
    max_keys: usize,
) -> Vec<String> {
    let all_keys: BTreeSet<&str> = configs
        .iter()
        .flat_map(|cfg| cfg.keys().map(String::as_str))
        .collect();
    if all_keys.is_empty() || max_keys == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, usize)> = all_keys
        .into_iter()
        .map(|key| {
            let base_value = base_config.get(key);
            let diffs = configs
                .iter()
                .filter_map(|cfg| cfg.get(key))
                .filter(|value| base_value != Some(*value))
                .count();
            (key, diffs)
        })
        .collect();

    ranked.sort_by(|(a_key, a_diffs), (b_key, b_diffs)| {
        (*b_diffs > 0)
            .cmp(&(*a_diffs > 0))
            .then_with(|| b_diffs.cmp(a_diffs))
            .then_with(|| {
                score_config_key(b_key)
                    .partial_cmp(&score_config_key(a_key))
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a_key.cmp(b_key))
    });
    ranked.truncate(max_keys);
    ranked.into_iter().map(|(key, _)| key.to_string()).collect()
}

/// Compute one run's overrides against the baseline.
///
/// A selected key becomes an override when the run has it and the baseline
/// either lacks it or holds a different display string.
pub fn compute_overrides(
    config: &NormalizedConfig,
    base_config: &NormalizedConfig,
    selected_keys: &[String],
) -> NormalizedConfig {
    selected_keys
        .iter()
        .filter_map(|key| {
            let value = config.get(key)?;
            match base_config.get(key) {
                Some(base_value) if base_value == value => None,
                _ => Some((key.clone(), value.clone())),
            }
        })
        .collect()
}
