//! Data models for fwtidy.
//!
//! This module contains the plain values passed between the components:
//! - [`PipelineConfig`]: generator, formatter and traversal settings loaded from `fwtidy.yaml`
//! - [`Preset`]: the two built-in layouts (`board` and `cube`)
//! - [`FileTask`], [`FormatResult`], [`RunSummary`]: per-file work and its aggregate
//! - [`PipelineOutcome`]: top-level result mapped to the process exit status
//!
//! # Architecture Note
//!
//! Nothing here is mutated after construction. Configuration values are built once at the
//! entry point and passed by reference into the services.

pub mod config;
pub mod outcome;

pub use self::config::{FormatterConfig, GeneratorConfig, PipelineConfig, Preset, TraversalConfig};
pub use outcome::{
    FileTask, FormatOutcome, FormatReport, FormatResult, GenerationError, GenerationOutcome,
    PipelineOutcome, RunSummary,
};
