//! # rr-protocol
//!
//! Core data models for run-report.
//!
//! This crate defines all shared data structures used for:
//! - Per-run ingestion results (series, finals, condensed config)
//! - The finalized report handed to a rendering layer
//! - Resource caps that bound every stage of ingestion
//!
//! ## Modules
//!
//! - [`run_models`]: Per-run record built up during ingestion
//! - [`report_models`]: Finalized cross-run report
//! - [`limit_models`]: Resource caps with their defaults
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde and chrono
//! - Privacy by construction: local paths are never serialized
//! - Independent compilation: No dependencies on other run-report crates

pub mod limit_models;
pub mod report_models;
pub mod run_models;

// Re-export all public types for convenience
pub use limit_models::*;
pub use report_models::*;
pub use run_models::*;
