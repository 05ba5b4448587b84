//! Lock-free service counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::result::ResultState;

/// Cumulative counters updated by submitters and workers.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    submitted: AtomicU64,
    rejected: AtomicU64,
    dequeued: AtomicU64,
    valid_paths: AtomicU64,
    invalid_paths: AtomicU64,
    cancelled: AtomicU64,
    timed_out: AtomicU64,
    exceptions: AtomicU64,
    search_us: AtomicU64,
}

impl ServiceMetrics {
    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dequeued(&self) {
        self.dequeued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_completion(&self, state: ResultState, elapsed: Duration) {
        let counter = match state {
            ResultState::CompletedWithValidPath => &self.valid_paths,
            ResultState::CompletedWithInvalidPath => &self.invalid_paths,
            ResultState::CompletedWithCancellation => &self.cancelled,
            ResultState::CompletedWithTimeout => &self.timed_out,
            ResultState::CompletedWithException => &self.exceptions,
            ResultState::Requesting | ResultState::Processing => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.search_us.fetch_add(micros, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            valid_paths: self.valid_paths.load(Ordering::Relaxed),
            invalid_paths: self.invalid_paths.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            exceptions: self.exceptions.load(Ordering::Relaxed),
            search_us: self.search_us.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ServiceMetrics`].
///
/// Counters are read individually, so a snapshot taken while workers run
/// may be mid-update across fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Requests passed to `process`.
    pub submitted: u64,
    /// Requests completed at submission without queueing (invalid
    /// endpoints, full queue, stopped service).
    pub rejected: u64,
    /// Requests taken off the queue by a worker.
    pub dequeued: u64,
    /// Completions with a valid path.
    pub valid_paths: u64,
    /// Completions with no path.
    pub invalid_paths: u64,
    /// Completions by cancellation, including requests still queued at
    /// shutdown.
    pub cancelled: u64,
    /// Completions by timeout.
    pub timed_out: u64,
    /// Completions by error after queueing.
    pub exceptions: u64,
    /// Total operation time across completions, in microseconds.
    pub search_us: u64,
}

impl MetricsSnapshot {
    /// Requests that reached a terminal state after being queued.
    pub fn completed(&self) -> u64 {
        self.valid_paths + self.invalid_paths + self.cancelled + self.timed_out + self.exceptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = ServiceMetrics::default().snapshot();
        assert_eq!(m, MetricsSnapshot::default());
        assert_eq!(m.completed(), 0);
    }

    #[test]
    fn completions_are_bucketed_by_state() {
        let m = ServiceMetrics::default();
        m.record_completion(ResultState::CompletedWithValidPath, Duration::from_micros(40));
        m.record_completion(ResultState::CompletedWithTimeout, Duration::from_micros(2));
        m.record_completion(ResultState::Processing, Duration::from_secs(1));
        let s = m.snapshot();
        assert_eq!(s.valid_paths, 1);
        assert_eq!(s.timed_out, 1);
        assert_eq!(s.completed(), 2);
        assert_eq!(s.search_us, 42);
    }
}
