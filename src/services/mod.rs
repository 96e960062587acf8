//! Services module - the components that touch the filesystem and external tools.
//!
//! # Components
//!
//! - [`TreeWalker`]: lazily discovers source files under the configured roots, pruning
//!   excluded directory names before descending into them.
//! - [`FormatterService`]: probes the formatter once, then formats each discovered file in
//!   place, collecting a [`FormatResult`](crate::models::FormatResult) per file.
//! - [`GeneratorService`]: probes the code generator and runs its `generate` command once.
//! - [`ToolRunner`]: the seam to the operating system. [`SystemRunner`] spawns real processes
//!   through tokio; tests substitute a scripted runner.
//!
//! # Design Philosophy
//!
//! The services hold no state of their own. Configuration is borrowed from the caller and
//! every external call is attempted exactly once, sequentially.

pub mod formatter;
pub mod generator;
pub mod runner;
pub mod walker;

pub use formatter::FormatterService;
pub use generator::GeneratorService;
pub use runner::{Invocation, SystemRunner, ToolRunner, ToolStatus};
pub use walker::TreeWalker;
