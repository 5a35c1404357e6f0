//! Config reading and normalization.
//!
//! - [`loader`]: size-capped JSON/TOML parsing into flattened key paths
//! - [`redact`]: sensitive-key and path-like-value filtering plus the
//!   value-to-display-string policy

pub mod loader;
pub mod redact;

pub use loader::read_config;
pub use redact::{display_value, is_sensitive_key, looks_like_path_value, normalize_config};
