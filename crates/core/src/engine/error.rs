use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole report build.
///
/// Per-file trouble during ingestion degrades to record warnings instead;
/// only unusable top-level input reaches this type.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("at least one run directory is required")]
    NoRuns,

    #[error("run path is not a directory (run #{index}): {path}")]
    RunDirNotFound { index: usize, path: PathBuf },

    #[error("--base-run index out of range: {reference}")]
    BaselineOutOfRange { reference: String },

    #[error("--base-run did not match any run dir name: {reference}")]
    BaselineNotFound { reference: String },
}
