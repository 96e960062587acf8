// Run metrics module
//
// Lightweight counters for one pipeline run, logged at debug level on completion

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-run metrics
///
/// Uses atomic operations so the services can record through a shared reference.
#[derive(Debug)]
pub struct Metrics {
    /// Files the formatter accepted
    pub files_formatted: AtomicUsize,

    /// Files the formatter rejected or could not process
    pub files_failed: AtomicUsize,

    /// External tool invocations, probes included
    pub tool_invocations: AtomicU64,

    /// Total time spent waiting on external tools in milliseconds
    pub total_tool_time_ms: AtomicU64,

    /// Run start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            files_formatted: AtomicUsize::new(0),
            files_failed: AtomicUsize::new(0),
            tool_invocations: AtomicU64::new(0),
            total_tool_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_file_formatted(&self) {
        self.files_formatted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one external tool call and how long it blocked
    pub fn record_tool_call(&self, duration: Duration) {
        self.tool_invocations.fetch_add(1, Ordering::Relaxed);
        self.total_tool_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get total elapsed time since the run started
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average time per tool call in milliseconds
    pub fn avg_tool_time_ms(&self) -> f64 {
        let total = self.total_tool_time_ms.load(Ordering::Relaxed);
        let count = self.tool_invocations.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::debug!("=== Run Metrics ===");
        tracing::debug!("Elapsed: {:.2}s", self.uptime().as_secs_f64());
        tracing::debug!(
            "Files: {} formatted, {} failed",
            self.files_formatted.load(Ordering::Relaxed),
            self.files_failed.load(Ordering::Relaxed)
        );
        tracing::debug!(
            "Tool calls: {} ({:.2}s total, avg {:.2}ms)",
            self.tool_invocations.load(Ordering::Relaxed),
            self.total_tool_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_tool_time_ms()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.files_formatted.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.files_failed.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.tool_invocations.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_file_outcomes() {
        let metrics = Metrics::new();

        metrics.record_file_formatted();
        metrics.record_file_formatted();
        metrics.record_file_failed();

        assert_eq!(metrics.files_formatted.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.files_failed.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_record_tool_time() {
        let metrics = Metrics::new();

        metrics.record_tool_call(Duration::from_millis(100));
        metrics.record_tool_call(Duration::from_millis(200));

        assert_eq!(metrics.tool_invocations.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.total_tool_time_ms.load(Ordering::Relaxed), 300);
        assert_eq!(metrics.avg_tool_time_ms(), 150.0);
    }

    #[test]
    fn test_avg_tool_time_no_calls() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_tool_time_ms(), 0.0);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
