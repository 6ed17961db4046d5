//! Logger metrics for observability
//!
//! Counts emissions that reached every admitting sink and emissions where at
//! least one sink failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Write counters for one logger
///
/// # Example
///
/// ```
/// use multisink_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_failed();
/// metrics.record_written();
///
/// assert_eq!(metrics.failed_count(), 1);
/// assert_eq!(metrics.total_written(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Emissions delivered to every sink that admitted them
    total_written: AtomicU64,

    /// Emissions where at least one sink returned an error or panicked
    failed_count: AtomicU64,

    /// Tables written to the console
    tables_written: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            tables_written: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn tables_written(&self) -> u64 {
        self.tables_written.load(Ordering::Relaxed)
    }

    /// Record a fully delivered emission, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a partially failed emission, returning the previous count
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_table(&self) -> u64 {
        self.tables_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.total_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            failed_count: AtomicU64::new(self.failed_count()),
            tables_written: AtomicU64::new(self.tables_written()),
        }
    }
}
