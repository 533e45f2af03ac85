//! patterngen library exports
//!
//! Fetches catalog patterns and writes, per pattern, a deployment manifest,
//! a package descriptor and a static-site page.

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod normalize;
pub mod package;
pub mod page;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::CatalogError;
pub use pipeline::{PatternFailure, PatternOutcome, Pipeline, RunSummary};
