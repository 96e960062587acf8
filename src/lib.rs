// fwtidy - code generation + formatting orchestrator for STM32 firmware projects
//
// This is the library crate containing the traversal, tool invocation and pipeline logic.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use models::{
    FileTask, FormatOutcome, FormatReport, FormatResult, GenerationOutcome, PipelineConfig,
    PipelineOutcome, Preset, RunSummary, TraversalConfig,
};
pub use pipeline::{Pipeline, PipelineState};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
