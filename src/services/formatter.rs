use crate::metrics::Metrics;
use crate::models::{FileTask, FormatOutcome, FormatReport, FormatResult, FormatterConfig};
use crate::services::runner::{Invocation, ToolRunner, ToolStatus};
use camino::Utf8Path;
use std::time::Instant;

/// Runs the external formatter over a stream of files, one at a time.
///
/// The formatter is probed once before any file is touched. A missing tool aborts the whole
/// pass; a failure on one file is recorded and the pass moves on to the next.
pub struct FormatterService<'a, R> {
    runner: &'a R,
    config: &'a FormatterConfig,
    base_dir: &'a Utf8Path,
    metrics: Option<&'a Metrics>,
}

impl<'a, R: ToolRunner> FormatterService<'a, R> {
    /// # Arguments
    /// * `runner` - Executes the formatter processes
    /// * `config` - Formatter program and arguments
    /// * `base_dir` - Stable directory progress lines are rendered relative to
    pub fn new(runner: &'a R, config: &'a FormatterConfig, base_dir: &'a Utf8Path) -> Self {
        Self {
            runner,
            config,
            base_dir,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &'a Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// `<formatter> --version`, output discarded
    pub fn probe_invocation(&self) -> Invocation {
        Invocation::new(&self.config.program)
            .args(&self.config.version_args)
            .current_dir(self.base_dir)
            .quiet()
    }

    /// `<formatter> -i -style=file <path>`
    pub fn format_invocation(&self, task: &FileTask) -> Invocation {
        Invocation::new(&self.config.program)
            .args(&self.config.args)
            .arg(task.path.as_str())
            .current_dir(self.base_dir)
    }

    /// Check once that the formatter can be started at all.
    ///
    /// Only a missing executable counts as unavailable. A probe that runs but exits non-zero
    /// is logged and the pass proceeds.
    pub async fn is_available(&self) -> bool {
        match self.run(&self.probe_invocation()).await {
            ToolStatus::Success => true,
            ToolStatus::Missing => false,
            ToolStatus::Failed { code } => {
                tracing::warn!(
                    "'{}' version check exited with code {:?}, continuing",
                    self.config.program,
                    code
                );
                true
            }
        }
    }

    /// Format a single file in place.
    pub async fn format_file(&self, task: &FileTask) -> FormatResult {
        let shown = task.display_relative(self.base_dir);

        let outcome = match self.run(&self.format_invocation(task)).await {
            ToolStatus::Success => {
                tracing::info!("Formatted: {}", shown);
                FormatOutcome::Success
            }
            ToolStatus::Failed { code } => {
                match code {
                    Some(code) => tracing::error!("Failed to format {} (exit code {})", shown, code),
                    None => tracing::error!("Failed to format {} (terminated)", shown),
                }
                FormatOutcome::ToolFailure { code }
            }
            ToolStatus::Missing => {
                tracing::error!(
                    "Failed to format {}: '{}' could not be started",
                    shown,
                    self.config.program
                );
                FormatOutcome::ToolMissing
            }
        };

        if let Some(metrics) = self.metrics {
            if outcome == FormatOutcome::Success {
                metrics.record_file_formatted();
            } else {
                metrics.record_file_failed();
            }
        }

        FormatResult {
            path: task.path.clone(),
            outcome,
        }
    }

    /// Format every task in order and report the aggregate.
    ///
    /// Tasks are pulled lazily, so nothing is walked when the probe fails.
    pub async fn format_all<I>(&self, tasks: I) -> FormatReport
    where
        I: IntoIterator<Item = FileTask>,
    {
        tracing::info!("--- Formatting Code ---");

        if !self.is_available().await {
            tracing::error!(
                "Error: '{}' not found. Skipping formatting.",
                self.config.program
            );
            let report = FormatReport::tool_missing();
            tracing::info!("Formatting complete. {}", report.summary);
            return report;
        }

        let mut results = Vec::new();
        for task in tasks {
            results.push(self.format_file(&task).await);
        }

        let report = FormatReport::from_results(results);
        tracing::info!(
            "Formatting complete. Processed {} files. ({})",
            report.summary.succeeded,
            report.summary
        );
        report
    }

    async fn run(&self, invocation: &Invocation) -> ToolStatus {
        let start = Instant::now();
        let status = self.runner.run(invocation).await;
        if let Some(metrics) = self.metrics {
            metrics.record_tool_call(start.elapsed());
        }
        status
    }
}
