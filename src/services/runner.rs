use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Result of running an external tool once.
///
/// A missing executable or a non-zero exit is a value here, not an error;
/// callers decide how far it propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Success,
    /// The executable could not be resolved or started.
    Missing,
    /// The tool ran and exited non-zero (`None` when no exit code is available).
    Failed { code: Option<i32> },
}

impl ToolStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Success)
    }
}

/// One external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<Utf8PathBuf>,
    /// Discard stdout/stderr (used for availability probes).
    pub quiet: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            quiet: false,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: &Utf8Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Seam between the orchestration logic and the operating system.
///
/// Every call blocks the caller until the process exits; there is no timeout.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    async fn run(&self, invocation: &Invocation) -> ToolStatus;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    async fn run(&self, invocation: &Invocation) -> ToolStatus {
        (**self).run(invocation).await
    }
}

/// Runs tools as real subprocesses through tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> ToolStatus {
        tracing::debug!("Executing: {}", invocation);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());

        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        if invocation.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let start = Instant::now();

        let status = match cmd.status().await {
            Ok(status) => status,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                tracing::debug!("Failed to start {}: {}", invocation.program, e);
                return ToolStatus::Missing;
            }
            Err(e) => {
                tracing::warn!("Failed to run {}: {}", invocation.program, e);
                return ToolStatus::Failed { code: None };
            }
        };

        tracing::debug!(
            "{} completed in {:.2}s with exit code {:?}",
            invocation.program,
            start.elapsed().as_secs_f32(),
            status.code()
        );

        if status.success() {
            ToolStatus::Success
        } else {
            ToolStatus::Failed {
                code: status.code(),
            }
        }
    }
}
