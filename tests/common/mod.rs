//! Shared helpers for integration tests

#![allow(dead_code)]

use camino::Utf8PathBuf;
use fwtidy::services::{Invocation, ToolRunner, ToolStatus};
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a project tree with the given (relative) files, each holding `contents`.
pub fn create_project(files: &[&str]) -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    for file in files {
        let path = base.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "int main(void) { return 0; }\n").unwrap();
    }
    (temp_dir, base)
}

/// Runner that answers from a script instead of spawning processes.
///
/// Lookup order: probe status (quiet calls), status keyed by file name suffix of the last
/// argument, status keyed by program. Unknown programs are reported missing.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    programs: HashMap<String, ToolStatus>,
    probes: HashMap<String, ToolStatus>,
    files: HashMap<String, ToolStatus>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(mut self, program: &str, status: ToolStatus) -> Self {
        self.programs.insert(program.to_string(), status);
        self
    }

    pub fn probe(mut self, program: &str, status: ToolStatus) -> Self {
        self.probes.insert(program.to_string(), status);
        self
    }

    /// Status for per-file calls whose path ends with `suffix`.
    pub fn file(mut self, suffix: &str, status: ToolStatus) -> Self {
        self.files.insert(suffix.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }

    /// Calls that were not availability probes.
    pub fn work_calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls_to(program).into_iter().filter(|c| !c.quiet).collect()
    }
}

impl ToolRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> ToolStatus {
        self.calls.lock().unwrap().push(invocation.clone());

        if invocation.quiet {
            if let Some(status) = self.probes.get(&invocation.program) {
                return *status;
            }
        } else if let Some(last) = invocation.args.last() {
            if let Some((_, status)) = self.files.iter().find(|(suffix, _)| last.ends_with(*suffix)) {
                return *status;
            }
        }

        self.programs
            .get(&invocation.program)
            .copied()
            .unwrap_or(ToolStatus::Missing)
    }
}
