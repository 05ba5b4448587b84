//! Service configuration and validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Largest accepted explicit worker count.
pub const MAX_WORKERS: usize = 64;

// ── ServiceConfig ──────────────────────────────────────────────────

/// Configuration for [`NavigationService`](crate::NavigationService).
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism / 2`, clamped to `[1, 16]`).
    pub worker_count: Option<usize>,
    /// How long an idle worker waits on the lifecycle or the queue before
    /// re-checking, in milliseconds. Default: 100.
    pub idle_poll_ms: u64,
    /// Budget for workers to report stopped during shutdown, in
    /// milliseconds. Default: 5000.
    pub shutdown_timeout_ms: u64,
    /// Queue bound. `None` = unbounded. A full queue completes new
    /// handles immediately with [`NavError::QueueFull`](gridnav_core::NavError::QueueFull).
    pub queue_capacity: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            idle_poll_ms: 100,
            shutdown_timeout_ms: 5000,
            queue_capacity: None,
        }
    }
}

impl ServiceConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.worker_count {
            Some(0) => return Err(ConfigError::ZeroWorkers),
            Some(n) if n > MAX_WORKERS => {
                return Err(ConfigError::TooManyWorkers {
                    configured: n,
                    max: MAX_WORKERS,
                })
            }
            _ => {}
        }
        if self.idle_poll_ms == 0 {
            return Err(ConfigError::ZeroIdlePoll);
        }
        if self.shutdown_timeout_ms == 0 {
            return Err(ConfigError::ZeroShutdownTimeout);
        }
        if self.queue_capacity == Some(0) {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, MAX_WORKERS]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, MAX_WORKERS),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(1, 16)
            }
        }
    }

    /// [`idle_poll_ms`](Self::idle_poll_ms) as a `Duration`.
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    /// [`shutdown_timeout_ms`](Self::shutdown_timeout_ms) as a `Duration`.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`ServiceConfig::validate()`] or while starting
/// workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `worker_count` is `Some(0)`.
    ZeroWorkers,
    /// `worker_count` exceeds [`MAX_WORKERS`].
    TooManyWorkers {
        /// The configured count.
        configured: usize,
        /// The largest accepted count.
        max: usize,
    },
    /// `idle_poll_ms` is zero.
    ZeroIdlePoll,
    /// `shutdown_timeout_ms` is zero.
    ZeroShutdownTimeout,
    /// `queue_capacity` is `Some(0)`.
    ZeroQueueCapacity,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "worker_count must be at least 1"),
            Self::TooManyWorkers { configured, max } => {
                write!(f, "worker_count {configured} exceeds maximum of {max}")
            }
            Self::ZeroIdlePoll => write!(f, "idle_poll_ms must be at least 1"),
            Self::ZeroShutdownTimeout => write!(f, "shutdown_timeout_ms must be at least 1"),
            Self::ZeroQueueCapacity => write!(f, "queue_capacity must be at least 1"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ServiceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_workers_rejected() {
        let cfg = ServiceConfig {
            worker_count: Some(0),
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn too_many_workers_rejected() {
        let cfg = ServiceConfig {
            worker_count: Some(65),
            ..ServiceConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::TooManyWorkers { configured: 65, max }) => assert_eq!(max, 64),
            other => panic!("expected TooManyWorkers, got {other:?}"),
        }
    }

    #[test]
    fn zero_durations_and_capacity_rejected() {
        let cfg = ServiceConfig {
            idle_poll_ms: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroIdlePoll));
        let cfg = ServiceConfig {
            shutdown_timeout_ms: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroShutdownTimeout));
        let cfg = ServiceConfig {
            queue_capacity: Some(0),
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroQueueCapacity));
    }

    #[test]
    fn resolved_worker_count_clamps() {
        let cfg = ServiceConfig {
            worker_count: Some(200),
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.resolved_worker_count(), MAX_WORKERS);
        let cfg = ServiceConfig {
            worker_count: Some(3),
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 3);
    }

    #[test]
    fn resolved_worker_count_auto() {
        let count = ServiceConfig::default().resolved_worker_count();
        assert!((1..=16).contains(&count), "auto count {count} out of [1,16]");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::TooManyWorkers {
                configured: 80,
                max: 64
            }
            .to_string(),
            "worker_count 80 exceeds maximum of 64"
        );
    }
}
