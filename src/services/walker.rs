//! Source tree discovery.
//!
//! [`TreeWalker`] turns a [`TraversalConfig`] into a lazy stream of [`FileTask`]s. Excluded
//! directories are pruned before the walk descends into them, so their subtrees are never
//! read at all.

use crate::models::{FileTask, TraversalConfig};
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks the configured roots and yields every matching source file.
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'a> {
    config: &'a TraversalConfig,
    base_dir: &'a Utf8Path,
}

impl<'a> TreeWalker<'a> {
    /// # Arguments
    /// * `config` - Roots, allowed extensions and excluded directory names
    /// * `base_dir` - Directory relative roots are resolved against
    pub fn new(config: &'a TraversalConfig, base_dir: &'a Utf8Path) -> Self {
        Self { config, base_dir }
    }

    /// Lazily walk every root in order.
    ///
    /// A root that does not exist is reported with a warning and skipped. Files are yielded
    /// in filesystem listing order, which is not stable across platforms.
    pub fn walk(self) -> impl Iterator<Item = FileTask> + 'a {
        let config = self.config;

        config
            .resolved_roots(self.base_dir)
            .filter_map(|(configured, full)| {
                if full.exists() {
                    Some(full)
                } else {
                    tracing::warn!("Directory '{}' not found. Skipping.", configured);
                    None
                }
            })
            .flat_map(move |root| walk_root(config, root))
    }
}

fn walk_root(config: &TraversalConfig, root: Utf8PathBuf) -> impl Iterator<Item = FileTask> + '_ {
    tracing::debug!("Walking {}", root);

    WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| !is_pruned(config, entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| config.matches_extension(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => Some(FileTask::new(path)),
            Err(path) => {
                tracing::warn!("Skipping non UTF-8 path: {}", path.display());
                None
            }
        })
}

/// Directories below the root whose name is excluded are never entered.
fn is_pruned(config: &TraversalConfig, entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded_dir(name))
}
