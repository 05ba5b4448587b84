//! Cooperative cancellation and timeout checks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// What a [`Budget`] check decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    /// Keep going.
    Continue,
    /// The cancel flag was raised.
    Cancelled,
    /// The time limit elapsed.
    TimedOut {
        /// The configured limit.
        limit: Duration,
        /// Time spent when the check fired. Never below `limit`.
        elapsed: Duration,
    },
}

/// A running search's cancel flag and deadline.
///
/// The clock starts at [`Budget::start`]. Cancellation is checked before
/// the deadline, so a cancelled search that is also out of time reports
/// cancellation.
#[derive(Debug)]
pub struct Budget<'a> {
    cancel: &'a AtomicBool,
    limit: Duration,
    started: Instant,
}

impl<'a> Budget<'a> {
    /// Start the clock.
    pub fn start(cancel: &'a AtomicBool, limit: Duration) -> Self {
        Self {
            cancel,
            limit,
            started: Instant::now(),
        }
    }

    /// Check the cancel flag, then the deadline.
    pub fn check(&self) -> Checkpoint {
        if self.cancel.load(Ordering::Acquire) {
            return Checkpoint::Cancelled;
        }
        let elapsed = self.started.elapsed();
        if self.limit <= elapsed {
            return Checkpoint::TimedOut {
                limit: self.limit,
                elapsed,
            };
        }
        Checkpoint::Continue
    }

    /// Time since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The configured time limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}
