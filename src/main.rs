//! fwtidy - regenerate STM32 HAL scaffolding and normalize source style
//!
//! Main entry point for the command-line tool.
//!
//! # Execution Flow
//!
//! 1. Parse arguments and initialize logging (stdout, optional rotating file)
//! 2. Resolve the project directory and load `fwtidy.yaml` (or the preset defaults)
//! 3. Apply command-line overrides
//! 4. Create a single-threaded tokio runtime; every external tool call blocks the run
//! 5. Run the selected command and map its outcome to the exit status
//!
//! # Exit Status
//!
//! - `0`: pipeline finished (individual files may still have failed to format)
//! - `1`: the code generator was missing or failed
//! - `2`: configuration or I/O error before the pipeline could run

use anyhow::{Context, Result};
use clap::Parser;
use fwtidy::cli::{Cli, Command};
use fwtidy::services::{SystemRunner, TreeWalker};
use fwtidy::{APP_NAME, ConfigManager, Pipeline, VERSION};
use std::process::ExitCode;

const EXIT_SETUP_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match fwtidy::logging::setup_logging(cli.verbose, cli.log_dir.as_deref(), APP_NAME)
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_SETUP_ERROR);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::from(EXIT_SETUP_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    let project_dir = cli
        .project_dir
        .canonicalize_utf8()
        .with_context(|| format!("Failed to resolve project directory: {}", cli.project_dir))?;

    let mut manager = ConfigManager::new(&project_dir)?;
    if let Some(config_path) = &cli.config {
        manager = manager.with_config_path(config_path);
    }

    let preset = cli.preset;
    let load_config = || manager.load_config(preset);

    let code = match cli.command.unwrap_or_default() {
        Command::Init { force } => {
            manager.save_config(&preset.config(), force)?;
            0
        }
        Command::Run {
            generate,
            no_generate,
            overrides,
        } => {
            let mut config = load_config()?;
            overrides.apply(&mut config);
            if generate {
                config.generator.enabled = true;
            }
            if no_generate {
                config.generator.enabled = false;
            }

            let mut pipeline = Pipeline::new(&config, &project_dir, SystemRunner::new());
            runtime()?.block_on(pipeline.run()).exit_code()
        }
        Command::Format { overrides } => {
            let mut config = load_config()?;
            overrides.apply(&mut config);
            config.generator.enabled = false;

            let mut pipeline = Pipeline::new(&config, &project_dir, SystemRunner::new());
            runtime()?.block_on(pipeline.run()).exit_code()
        }
        Command::Generate { generator } => {
            let mut config = load_config()?;
            if let Some(program) = generator {
                config.generator.program = program;
            }

            let mut pipeline = Pipeline::new(&config, &project_dir, SystemRunner::new());
            if runtime()?.block_on(pipeline.run_generation()).is_failed() {
                1
            } else {
                0
            }
        }
        Command::List { overrides } => {
            let mut config = load_config()?;
            overrides.apply(&mut config);

            let mut count = 0usize;
            for task in TreeWalker::new(&config.traversal, &project_dir).walk() {
                println!("{}", task.display_relative(&project_dir));
                count += 1;
            }
            tracing::info!("{} files match", count);
            0
        }
    };

    Ok(ExitCode::from(code))
}

/// Every phase runs sequentially on this thread.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}
