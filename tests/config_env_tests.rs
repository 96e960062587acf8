//! Environment overrides for ConfigManager
//!
//! Kept in its own test binary: environment variables are process-wide and would
//! leak into the file-only tests running in parallel.

use camino::Utf8PathBuf;
use fwtidy::{ConfigManager, Preset};
use std::fs;
use tempfile::TempDir;

/// Sets variables for the lifetime of the guard and removes them on drop.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            // SAFETY: this binary has a single test, so no other thread reads the environment
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            // SAFETY: see `EnvGuard::set`
            unsafe { std::env::remove_var(key) };
        }
    }
}

#[test]
fn test_environment_overrides_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let project_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    fs::write(
        project_path.join("fwtidy.yaml"),
        "generator:\n  enabled: false\ntraversal:\n  exclude_dirs: [Drivers, build]\n",
    )
    .unwrap();
    let manager = ConfigManager::new(&project_path).unwrap();

    let config = {
        let _env = EnvGuard::set(&[
            ("FWTIDY_GENERATOR__ENABLED", "true"),
            ("FWTIDY_TRAVERSAL__EXCLUDE_DIRS", "out,tmp"),
            ("FWTIDY_FORMATTER__PROGRAM", "clang-format-17"),
        ]);
        manager.load_config(Preset::Board).unwrap()
    };

    assert!(config.generator.enabled);
    assert_eq!(config.formatter.program, "clang-format-17");
    assert_eq!(
        config.traversal.exclude_dirs.iter().collect::<Vec<_>>(),
        vec!["out", "tmp"]
    );
    assert!(!config.traversal.is_excluded_dir("Drivers"));

    // Without the variables the file values come back
    let config = manager.load_config(Preset::Board).unwrap();
    assert!(!config.generator.enabled);
    assert!(config.traversal.is_excluded_dir("Drivers"));
}
