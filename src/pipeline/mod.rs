// Pipeline controller
//
// Runs the optional generation phase, gates formatting on its result and reports the
// final outcome. Phases run strictly one after the other.

use crate::metrics::Metrics;
use crate::models::{GenerationOutcome, PipelineConfig, PipelineOutcome};
use crate::services::{FormatterService, GeneratorService, ToolRunner, TreeWalker};
use camino::Utf8Path;

/// Controller states
///
/// ```text
/// Idle -> GeneratingCode -> Formatting -> Done
///   |           |
///   |           +-> Aborted
///   +-> Formatting (generation not configured)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    GeneratingCode,
    Formatting,
    /// Generation failed; formatting never started
    Aborted,
    Done,
}

impl PipelineState {
    /// Check whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, GeneratingCode)
                | (Idle, Formatting)
                | (GeneratingCode, Formatting)
                | (GeneratingCode, Aborted)
                | (GeneratingCode, Done)
                | (Formatting, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Aborted | PipelineState::Done)
    }
}

/// Two-phase pipeline: code generation, then tree formatting.
///
/// Only a generator failure (tool missing or non-zero exit) fails the pipeline. Files the
/// formatter rejects are reported in the summary but leave the pipeline successful.
///
/// # Usage
///
/// ```ignore
/// let runner = SystemRunner::new();
/// let mut pipeline = Pipeline::new(&config, &project_dir, runner);
/// let outcome = pipeline.run().await;
/// std::process::exit(outcome.exit_code().into());
/// ```
pub struct Pipeline<'a, R> {
    config: &'a PipelineConfig,
    project_dir: &'a Utf8Path,
    runner: R,
    metrics: Metrics,
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl<'a, R: ToolRunner> Pipeline<'a, R> {
    /// # Arguments
    /// * `config` - Generator, formatter and traversal settings
    /// * `project_dir` - Base directory for relative roots, tool working directory and
    ///   progress output
    /// * `runner` - Executes the external tools
    pub fn new(config: &'a PipelineConfig, project_dir: &'a Utf8Path, runner: R) -> Self {
        Self {
            config,
            project_dir,
            runner,
            metrics: Metrics::new(),
            state: PipelineState::Idle,
            history: vec![PipelineState::Idle],
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Every state visited by the most recent run, starting with `Idle`.
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run the full pipeline.
    ///
    /// Generation runs first when enabled in the configuration. On generation failure the
    /// pipeline stops in `Aborted` without walking the tree. Otherwise every discovered file
    /// is formatted and the pipeline ends in `Done`.
    pub async fn run(&mut self) -> PipelineOutcome {
        self.reset();

        let generation = if self.config.generator.enabled {
            self.transition(PipelineState::GeneratingCode);
            self.generator().generate().await
        } else {
            tracing::debug!("Code generation not configured, skipping");
            GenerationOutcome::Skipped
        };

        if let GenerationOutcome::Failed(error) = &generation {
            self.transition(PipelineState::Aborted);
            tracing::error!("Pipeline aborted before formatting: {}", error);
            self.metrics.log_summary();
            return PipelineOutcome {
                generation,
                formatting: None,
            };
        }

        self.transition(PipelineState::Formatting);

        let walker = TreeWalker::new(&self.config.traversal, self.project_dir);
        let report = FormatterService::new(&self.runner, &self.config.formatter, self.project_dir)
            .with_metrics(&self.metrics)
            .format_all(walker.walk())
            .await;

        self.transition(PipelineState::Done);

        tracing::info!("=== All Done === ({})", report.summary);
        self.metrics.log_summary();

        PipelineOutcome {
            generation,
            formatting: Some(report),
        }
    }

    /// Run only the generation phase, regardless of whether it is enabled in the config.
    pub async fn run_generation(&mut self) -> GenerationOutcome {
        self.reset();
        self.transition(PipelineState::GeneratingCode);

        let outcome = self.generator().generate().await;

        if outcome.is_failed() {
            self.transition(PipelineState::Aborted);
        } else {
            self.transition(PipelineState::Done);
            tracing::info!("=== All Done ===");
        }
        self.metrics.log_summary();
        outcome
    }

    fn generator(&self) -> GeneratorService<'_, R> {
        GeneratorService::new(&self.runner, &self.config.generator, self.project_dir)
    }

    fn reset(&mut self) {
        if self.state.is_terminal() {
            tracing::debug!("Resetting pipeline from {:?}", self.state);
        }
        self.state = PipelineState::Idle;
        self.history = vec![PipelineState::Idle];
    }

    fn transition(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid pipeline transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!("Pipeline state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }
}
