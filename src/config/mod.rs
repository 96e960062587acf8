use crate::models::{PipelineConfig, Preset};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ::config::{Config, Environment, File, FileFormat};
use std::fs;
use thiserror::Error;

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "fwtidy.yaml";

/// Prefix for environment overrides, e.g. `FWTIDY_GENERATOR__ENABLED=true`.
pub const ENV_PREFIX: &str = "FWTIDY";

/// Errors that can occur while locating or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Project directory {0} does not exist")]
    ProjectDirMissing(Utf8PathBuf),

    #[error("Configuration file {0} already exists (use --force to overwrite)")]
    AlreadyExists(Utf8PathBuf),
}

/// Configuration manager for the project's `fwtidy.yaml`.
///
/// Values are layered in this order, later sources winning:
/// 1. Built-in preset defaults (used only when no file exists)
/// 2. `fwtidy.yaml` in the project directory
/// 3. `FWTIDY_*` environment variables (`__` separates nested keys, lists are comma separated)
#[derive(Debug, Clone)]
pub struct ConfigManager {
    project_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given project directory.
    ///
    /// # Arguments
    /// * `project_dir` - Firmware project root; relative traversal roots resolve against it
    pub fn new<P: AsRef<Utf8Path>>(project_dir: P) -> Result<Self> {
        let project_dir = project_dir.as_ref().to_path_buf();

        if !project_dir.is_dir() {
            return Err(ConfigError::ProjectDirMissing(project_dir).into());
        }

        Ok(Self {
            config_path: project_dir.join(CONFIG_FILE_NAME),
            project_dir,
        })
    }

    /// Use an explicit configuration file instead of `<project_dir>/fwtidy.yaml`.
    pub fn with_config_path<P: AsRef<Utf8Path>>(mut self, config_path: P) -> Self {
        let config_path = config_path.as_ref();
        self.config_path = if config_path.is_absolute() {
            config_path.to_path_buf()
        } else {
            self.project_dir.join(config_path)
        };
        self
    }

    /// Load the pipeline configuration.
    ///
    /// # Arguments
    /// * `preset` - Defaults used when the configuration file does not exist
    ///
    /// # Returns
    /// The file contents with environment overrides applied, or the preset plus
    /// environment overrides if the file is missing
    pub fn load_config(&self, preset: Preset) -> Result<PipelineConfig> {
        let mut builder = Config::builder();

        if self.config_path.exists() {
            builder = builder.add_source(
                File::new(self.config_path.as_str(), FileFormat::Yaml).required(true),
            );
        } else {
            tracing::warn!(
                "Config file not found at {}, using {:?} preset",
                self.config_path,
                preset
            );
            let yaml = serde_yaml_ng::to_string(&preset.config())
                .context("Failed to serialize preset configuration")?;
            builder = builder.add_source(File::from_str(&yaml, FileFormat::Yaml));
        }

        let config: PipelineConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("generator.version_args")
                    .with_list_parse_key("generator.generate_args")
                    .with_list_parse_key("formatter.version_args")
                    .with_list_parse_key("formatter.args")
                    .with_list_parse_key("traversal.roots")
                    .with_list_parse_key("traversal.extensions")
                    .with_list_parse_key("traversal.exclude_dirs")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load config: {}", self.config_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Save the pipeline configuration file.
    ///
    /// # Arguments
    /// * `config` - The configuration to write
    /// * `overwrite` - Replace an existing file
    pub fn save_config(&self, config: &PipelineConfig, overwrite: bool) -> Result<()> {
        if self.config_path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(self.config_path.clone()).into());
        }

        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the project directory path.
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
