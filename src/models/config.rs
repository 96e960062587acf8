use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Source extensions formatted by both presets.
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".c", ".h", ".cpp", ".hpp"];

/// Directories skipped by the `board` preset (vendor HAL, VCS, IDE and build output).
pub const DEFAULT_EXCLUDED_DIRS: [&str; 5] = ["Drivers", ".git", ".vscode", "build", ".pio"];

/// Named starting points for a [`PipelineConfig`].
///
/// - `Board`: walk the whole project directory, skipping vendor and build folders.
///   No code generation.
/// - `Cube`: regenerate the CubeMX scaffolding first, then walk `Src` and `Inc` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Board,
    Cube,
}

impl Preset {
    /// Build the full configuration this preset stands for.
    pub fn config(self) -> PipelineConfig {
        match self {
            Preset::Board => PipelineConfig::default(),
            Preset::Cube => PipelineConfig {
                generator: GeneratorConfig {
                    enabled: true,
                    ..GeneratorConfig::default()
                },
                formatter: FormatterConfig::default(),
                traversal: TraversalConfig {
                    roots: vec![Utf8PathBuf::from("Src"), Utf8PathBuf::from("Inc")],
                    extensions: default_extensions(),
                    exclude_dirs: IndexSet::new(),
                },
            },
        }
    }
}

/// Complete configuration for one pipeline run, as stored in `fwtidy.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    pub formatter: FormatterConfig,
    pub traversal: TraversalConfig,
}

/// External code generator (stm32pio by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Run the generation phase before formatting.
    pub enabled: bool,

    /// Executable name or path, resolved through `PATH`.
    pub program: String,

    /// Arguments for the availability probe.
    pub version_args: Vec<String>,

    /// Arguments for the generate call. The generator reads its own project file.
    pub generate_args: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "stm32pio".to_string(),
            version_args: vec!["--version".to_string()],
            generate_args: vec!["generate".to_string()],
        }
    }
}

/// External in-place formatter (clang-format by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub program: String,

    pub version_args: Vec<String>,

    /// Arguments placed before the file path on every per-file call.
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            program: "clang-format".to_string(),
            version_args: vec!["--version".to_string()],
            // -i edits in place, -style=file picks up the nearest .clang-format
            args: vec!["-i".to_string(), "-style=file".to_string()],
        }
    }
}

/// Which files the tree walker yields.
///
/// Extensions match the exact, case-sensitive suffix of the file name.
/// Excluded directory names match a single path component at any depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub roots: Vec<Utf8PathBuf>,
    pub extensions: IndexSet<String>,
    pub exclude_dirs: IndexSet<String>,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            roots: vec![Utf8PathBuf::from(".")],
            extensions: default_extensions(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl TraversalConfig {
    /// Check whether a file name carries one of the allowed extensions.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Check whether a directory name is excluded from traversal.
    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.contains(dir_name)
    }

    /// Roots resolved against the project base directory, paired with the configured value.
    ///
    /// Interior `.` components are dropped so `"."` resolves to `base_dir` itself.
    pub fn resolved_roots<'a>(
        &'a self,
        base_dir: &'a Utf8Path,
    ) -> impl Iterator<Item = (&'a Utf8Path, Utf8PathBuf)> + 'a {
        self.roots.iter().map(move |root| {
            let full: Utf8PathBuf = base_dir.join(root).components().collect();
            (root.as_path(), full)
        })
    }
}

fn default_extensions() -> IndexSet<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}
