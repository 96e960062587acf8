use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the level filter: `RUST_LOG` wins when set, otherwise info (or debug when verbose).
fn level_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Setup console logging, plus an optional rotating file log.
///
/// Console output is plain text lines on stdout: no timestamps, no targets, no colors.
///
/// # Arguments
/// * `verbose` - If true, use debug level; otherwise use info level
/// * `log_dir` - If set, also write a daily rotating log file there
/// * `log_prefix` - Prefix for log files (e.g., "fwtidy")
///
/// # Returns
/// A guard that must be held for the duration of the program when file logging is active
pub fn setup_logging(
    verbose: bool,
    log_dir: Option<&Utf8Path>,
    log_prefix: &str,
) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false)
        .without_time();

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(level_filter(verbose))
            .with(console_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(None);
    };

    // Create log directory if it doesn't exist
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }

    // Create daily rotating file appender
    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(level_filter(verbose))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        "Logging initialized: dir={}, prefix={}, verbose={}",
        log_dir,
        log_prefix,
        verbose
    );

    Ok(Some(guard))
}
