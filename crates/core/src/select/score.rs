//! Heuristic name scoring for metrics and config keys.
//!
//! Both scorers are plain lookups over (token group, weight) tables so the
//! weights can be tuned without touching the ranking control flow. A group
//! contributes its weight once if any of its tokens occurs as a substring of
//! the lowercased name.

/// Token groups for metric names. Evaluation-flavored and outcome-flavored
/// names rank up, wall-clock bookkeeping ranks down.
const METRIC_TOKEN_WEIGHTS: &[(&[&str], f64)] = &[
    (&["eval", "val", "test"], 5.0),
    (&["return", "reward", "success", "accuracy", "acc"], 5.0),
    (&["loss", "error"], 3.0),
    (&["runtime", "time", "throughput"], -3.0),
];

/// Token groups for config keys, roughly ordered by how often the parameter
/// explains a difference between runs.
const CONFIG_KEY_TOKEN_WEIGHTS: &[(&[&str], f64)] = &[
    (&["seed"], 8.0),
    (&["lr", "learning_rate", "learning-rate"], 8.0),
    (&["batch", "microbatch"], 7.0),
    (&["env", "task", "suite"], 6.0),
    (&["algo", "algorithm", "agent"], 6.0),
    (&["model", "policy", "arch", "network", "hidden", "layers"], 5.0),
    (
        &["gamma", "lambda", "clip", "entropy", "vf", "grad", "weight_decay", "optimizer"],
        4.0,
    ),
];

fn table_score(lower: &str, table: &[(&[&str], f64)]) -> f64 {
    table
        .iter()
        .filter(|(tokens, _)| tokens.iter().any(|tok| lower.contains(tok)))
        .map(|(_, weight)| weight)
        .sum()
}

/// Score a metric name for ranking. Underscore-prefixed names sort last.
pub fn score_metric(name: &str) -> f64 {
    let lower = name.to_lowercase();
    if lower.starts_with('_') {
        return -100.0;
    }
    table_score(&lower, METRIC_TOKEN_WEIGHTS) - lower.len().min(80) as f64 * 0.02
}

/// Score a config key for ranking. Deeply nested or very long keys rank down.
pub fn score_config_key(name: &str) -> f64 {
    let lower = name.to_lowercase();
    table_score(&lower, CONFIG_KEY_TOKEN_WEIGHTS)
        - name.matches('/').count() as f64 * 0.6
        - lower.len().min(160) as f64 * 0.02
}
