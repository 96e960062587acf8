//! Command-line definitions.

use crate::models::{PipelineConfig, Preset};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Regenerate STM32 HAL scaffolding, then normalize source style across the tree.
#[derive(Debug, Parser)]
#[command(name = "fwtidy", version, about, long_about = None)]
pub struct Cli {
    /// Firmware project directory (relative roots and progress output are based here)
    #[arg(short = 'C', long, global = true, default_value = ".", env = "FWTIDY_PROJECT_DIR")]
    pub project_dir: Utf8PathBuf,

    /// Configuration file (defaults to <project-dir>/fwtidy.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Defaults used when no configuration file exists
    #[arg(long, global = true, value_enum, default_value_t = Preset::Board)]
    pub preset: Preset,

    /// Print debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also keep a daily rotating log file in this directory (off by default; stdout stays
    /// the primary output)
    #[arg(long, global = true)]
    pub log_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate code (when enabled), then format the tree [default]
    Run {
        /// Run the generation phase even if the config disables it
        #[arg(long, conflicts_with = "no_generate")]
        generate: bool,

        /// Skip the generation phase even if the config enables it
        #[arg(long)]
        no_generate: bool,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Format the tree without generating code
    Format {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Run the code generator only
    Generate {
        /// Generator executable
        #[arg(long)]
        generator: Option<String>,
    },

    /// List the files that would be formatted
    List {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Write the preset configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Run {
            generate: false,
            no_generate: false,
            overrides: Overrides::default(),
        }
    }
}

/// Command-line replacements for configuration values.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Root directory to walk (repeatable, replaces configured roots)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<Utf8PathBuf>,

    /// File extension to format, e.g. ".c" (repeatable, replaces configured extensions)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory name never entered (repeatable, replaces configured exclusions)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Formatter executable
    #[arg(long, value_name = "PROGRAM")]
    pub formatter: Option<String>,

    /// Generator executable
    #[arg(long, value_name = "PROGRAM")]
    pub generator: Option<String>,
}

impl Overrides {
    /// Apply every override that was given on the command line.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if !self.roots.is_empty() {
            config.traversal.roots = self.roots.clone();
        }
        if !self.extensions.is_empty() {
            config.traversal.extensions = self.extensions.iter().cloned().collect();
        }
        if !self.exclude_dirs.is_empty() {
            config.traversal.exclude_dirs = self.exclude_dirs.iter().cloned().collect();
        }
        if let Some(program) = &self.formatter {
            config.formatter.program = program.clone();
        }
        if let Some(program) = &self.generator {
            config.generator.program = program.clone();
        }
    }
}
