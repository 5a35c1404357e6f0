//! Global selection across ingested runs.
//!
//! Once every run record exists, these routines pick which metrics and which
//! config keys are worth displaying, and compute per-run config overrides
//! relative to a baseline run. Everything here is pure: inputs in, ranked
//! lists out, no I/O.

pub mod metrics;
pub mod overrides;
pub mod score;

pub use metrics::select_metrics;
pub use overrides::{compute_overrides, resolve_baseline, select_override_keys};
pub use score::{score_config_key, score_metric};
