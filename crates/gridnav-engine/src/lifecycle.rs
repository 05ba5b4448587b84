//! Service lifecycle mirrored from the host's tick state.

use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, warn};

/// Overall service state.
///
/// `Initializing → Paused ⇄ Running → Stopped`. Workers only take work
/// while `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceState {
    /// Created, not yet started.
    Initializing,
    /// Started; the host is not ticking.
    Paused,
    /// The host is ticking; workers drain the queue.
    Running,
    /// Shut down. Terminal.
    Stopped,
}

impl ServiceState {
    pub(crate) const fn as_raw(self) -> u8 {
        match self {
            ServiceState::Initializing => 0,
            ServiceState::Paused => 1,
            ServiceState::Running => 2,
            ServiceState::Stopped => 3,
        }
    }

    pub(crate) const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => ServiceState::Initializing,
            1 => ServiceState::Paused,
            2 => ServiceState::Running,
            _ => ServiceState::Stopped,
        }
    }

    /// Whether workers wait for a state change instead of taking work.
    pub fn is_idle(self) -> bool {
        matches!(self, ServiceState::Initializing | ServiceState::Paused)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceState::Initializing => "initializing",
            ServiceState::Paused => "paused",
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Shared lifecycle with a condition variable so idle workers wake as
/// soon as the state changes.
pub(crate) struct Lifecycle {
    state: Mutex<ServiceState>,
    changed: Condvar,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ServiceState::Initializing),
            changed: Condvar::new(),
        }
    }

    pub(crate) fn state(&self) -> ServiceState {
        *self.lock()
    }

    /// `Initializing → Paused`. Returns whether the transition happened.
    pub(crate) fn start(&self) -> bool {
        self.transition(|from| match from {
            ServiceState::Initializing => Some(ServiceState::Paused),
            _ => None,
        })
        .is_some()
    }

    /// `Paused ⇄ Running`. Ignored with a warning while initializing or
    /// stopped. Returns the state afterwards.
    pub(crate) fn set_ticking(&self, ticking: bool) -> ServiceState {
        let target = if ticking {
            ServiceState::Running
        } else {
            ServiceState::Paused
        };
        self.transition(|from| match from {
            ServiceState::Paused | ServiceState::Running => Some(target),
            ServiceState::Initializing | ServiceState::Stopped => None,
        })
        .unwrap_or_else(|| self.state())
    }

    /// Move to `Stopped` from any state. Returns the previous state.
    pub(crate) fn stop(&self) -> ServiceState {
        let mut state = self.lock();
        let previous = *state;
        *state = ServiceState::Stopped;
        drop(state);
        self.changed.notify_all();
        if previous != ServiceState::Stopped {
            debug!("service {previous} -> stopped");
        }
        previous
    }

    /// Wait up to `timeout` while the state is idle. Returns the state
    /// when the wait ended.
    pub(crate) fn wait_while_idle(&self, timeout: Duration) -> ServiceState {
        let state = self.lock();
        let (state, _) = self
            .changed
            .wait_timeout_while(state, timeout, |s| s.is_idle())
            .unwrap_or_else(PoisonError::into_inner);
        *state
    }

    fn transition(
        &self,
        rule: impl FnOnce(ServiceState) -> Option<ServiceState>,
    ) -> Option<ServiceState> {
        let mut state = self.lock();
        let from = *state;
        match rule(from) {
            Some(to) => {
                *state = to;
                drop(state);
                self.changed.notify_all();
                if from != to {
                    debug!("service {from} -> {to}");
                }
                Some(to)
            }
            None => {
                warn!("ignoring lifecycle signal while {from}");
                None
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
