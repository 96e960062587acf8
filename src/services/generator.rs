use crate::models::{GenerationError, GenerationOutcome, GeneratorConfig};
use crate::services::runner::{Invocation, ToolRunner, ToolStatus};
use camino::Utf8Path;

/// Drives the external code generator (stm32pio by default).
///
/// The generator is run from the project directory so it picks up its own project file.
/// It is attempted exactly once; there is no retry.
pub struct GeneratorService<'a, R> {
    runner: &'a R,
    config: &'a GeneratorConfig,
    project_dir: &'a Utf8Path,
}

impl<'a, R: ToolRunner> GeneratorService<'a, R> {
    pub fn new(runner: &'a R, config: &'a GeneratorConfig, project_dir: &'a Utf8Path) -> Self {
        Self {
            runner,
            config,
            project_dir,
        }
    }

    pub fn probe_invocation(&self) -> Invocation {
        Invocation::new(&self.config.program)
            .args(&self.config.version_args)
            .current_dir(self.project_dir)
            .quiet()
    }

    pub fn generate_invocation(&self) -> Invocation {
        Invocation::new(&self.config.program)
            .args(&self.config.generate_args)
            .current_dir(self.project_dir)
    }

    /// Probe for the generator, then run it once.
    ///
    /// A probe that exits non-zero fails the phase with that exit code.
    ///
    /// Returns `Succeeded` or `Failed`; never `Skipped`, which is decided by the caller.
    pub async fn generate(&self) -> GenerationOutcome {
        let tool = &self.config.program;
        tracing::info!("--- Generating Code with {} ---", tool);

        let status = match self.runner.run(&self.probe_invocation()).await {
            ToolStatus::Success => self.runner.run(&self.generate_invocation()).await,
            // non-zero probe fails the phase with the probe exit code
            failed => failed,
        };

        match status {
            ToolStatus::Success => {
                tracing::info!("Code generation successful.");
                GenerationOutcome::Succeeded
            }
            ToolStatus::Missing => {
                let error = GenerationError::ToolMissing { tool: tool.clone() };
                tracing::error!("Error: {}", error);
                GenerationOutcome::Failed(error)
            }
            ToolStatus::Failed { code } => {
                let error = GenerationError::ExitCode {
                    tool: tool.clone(),
                    code,
                };
                tracing::error!("Error: {}", error);
                GenerationOutcome::Failed(error)
            }
        }
    }
}
