use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use thiserror::Error;

/// A single source file discovered by the tree walker, consumed once by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileTask {
    pub path: Utf8PathBuf,
}

impl FileTask {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render the path relative to `base_dir`, falling back to the full path
    /// when the file lives outside of it.
    pub fn display_relative<'a>(&'a self, base_dir: &Utf8Path) -> &'a Utf8Path {
        self.path.strip_prefix(base_dir).unwrap_or(self.path.as_path())
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Success,
    /// The formatter ran but exited non-zero (`None` when killed by a signal).
    ToolFailure { code: Option<i32> },
    /// The formatter could not be started for this file.
    ToolMissing,
}

/// Result of formatting one [`FileTask`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub path: Utf8PathBuf,
    pub outcome: FormatOutcome,
}

impl FormatResult {
    pub fn is_success(&self) -> bool {
        self.outcome == FormatOutcome::Success
    }
}

/// Aggregate counts for a formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of files actually handed to the formatter (0 when aborted up front).
    pub attempted: usize,
    pub succeeded: usize,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} files formatted, {} failed",
            self.succeeded,
            self.attempted,
            self.failed()
        )
    }
}

/// Everything the formatter produced for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatReport {
    /// True when the availability probe failed and no file was attempted.
    pub tool_missing: bool,
    pub results: Vec<FormatResult>,
    pub summary: RunSummary,
}

impl FormatReport {
    /// Report for a run aborted by the availability probe.
    pub fn tool_missing() -> Self {
        Self {
            tool_missing: true,
            ..Self::default()
        }
    }

    /// Build a report from per-file results, deriving the summary counts.
    pub fn from_results(results: Vec<FormatResult>) -> Self {
        let summary = RunSummary {
            attempted: results.len(),
            succeeded: results.iter().filter(|r| r.is_success()).count(),
        };
        Self {
            tool_missing: false,
            results,
            summary,
        }
    }

    /// Files that did not format cleanly.
    pub fn failures(&self) -> impl Iterator<Item = &FormatResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// Fatal failures of the generation phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("'{tool}' not found on PATH. Is it installed?")]
    ToolMissing { tool: String },

    #[error("{tool} generation failed with exit code {}", display_code(.code))]
    ExitCode { tool: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<terminated by signal>".to_string(),
    }
}

/// Outcome of the generation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// No generation phase was configured for this run.
    Skipped,
    Succeeded,
    Failed(GenerationError),
}

impl GenerationOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, GenerationOutcome::Failed(_))
    }
}

/// Top-level result of a pipeline run, surfaced as the process exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub generation: GenerationOutcome,
    /// Present only when generation did not fail.
    pub formatting: Option<FormatReport>,
}

impl PipelineOutcome {
    /// Only generator failures fail the pipeline; per-file formatter failures do not.
    pub fn is_success(&self) -> bool {
        !self.generation.is_failed()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn summary(&self) -> Option<RunSummary> {
        self.formatting.as_ref().map(|report| report.summary)
    }
}
