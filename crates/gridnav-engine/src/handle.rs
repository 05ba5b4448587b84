//! The join point between a submitter and the worker running its search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use gridnav_core::{Cell, NavError, NavGrid};

use crate::request::Request;
use crate::result::{NavResult, Outcome, ResultState};

struct Slot {
    state: ResultState,
    result: Option<Arc<NavResult>>,
}

/// A submitted request, its resolved endpoints, its result slot, and a
/// cancellation latch.
///
/// The submitter keeps an `Arc` to poll, wait, or cancel. Only the worker
/// executing the request writes the result, and it is written once.
pub struct RequestHandle {
    request: Arc<Request>,
    begin: Option<Cell>,
    end: Option<Cell>,
    cancel: AtomicBool,
    slot: Mutex<Slot>,
    completed: Condvar,
}

// Compile-time assertion: handles are shared between submitters and workers.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<RequestHandle>();
};

impl RequestHandle {
    /// Resolve both endpoints against `grid`.
    ///
    /// If either coordinate has no cell, the handle is returned already
    /// completed with [`NavError::InvalidBegin`] or [`NavError::InvalidEnd`]
    /// and must not be queued. Otherwise it is in
    /// [`ResultState::Requesting`].
    pub fn resolve(grid: &dyn NavGrid, request: Request) -> Self {
        let begin = grid.try_get_cell(request.begin());
        let end = grid.try_get_cell(request.end());
        let error = match (begin, end) {
            (None, _) => Some(NavError::InvalidBegin {
                begin: request.begin(),
                end: request.end(),
            }),
            (_, None) => Some(NavError::InvalidEnd {
                begin: request.begin(),
                end: request.end(),
            }),
            _ => None,
        };
        let handle = Self {
            request: Arc::new(request),
            begin,
            end,
            cancel: AtomicBool::new(false),
            slot: Mutex::new(Slot {
                state: ResultState::Requesting,
                result: None,
            }),
            completed: Condvar::new(),
        };
        if let Some(error) = error {
            handle.complete(NavResult::new(Outcome::Exception(error), Duration::ZERO));
        }
        handle
    }

    /// The request.
    pub fn request(&self) -> &Arc<Request> {
        &self.request
    }

    /// The resolved begin cell, if resolution succeeded.
    pub fn begin(&self) -> Option<Cell> {
        self.begin
    }

    /// The resolved end cell, if resolution succeeded.
    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    /// Ask the search to stop. Takes effect at the search's next check
    /// point; there is no way to undo it.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub(crate) fn cancel_flag(&self) -> &AtomicBool {
        &self.cancel
    }

    /// Current state.
    pub fn state(&self) -> ResultState {
        self.lock().state
    }

    /// Whether the result is available.
    pub fn is_completed(&self) -> bool {
        self.lock().result.is_some()
    }

    /// The result, if completed.
    pub fn result(&self) -> Option<Arc<NavResult>> {
        self.lock().result.clone()
    }

    /// Block until the result is available.
    pub fn wait(&self) -> Arc<NavResult> {
        let mut slot = self.lock();
        loop {
            if let Some(result) = &slot.result {
                return Arc::clone(result);
            }
            slot = self
                .completed
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until the result is available or `timeout` passes.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Arc<NavResult>> {
        let slot = self.lock();
        let (slot, _) = self
            .completed
            .wait_timeout_while(slot, timeout, |s| s.result.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        slot.result.clone()
    }

    /// `Requesting → Processing`. Returns `false` if the handle was not
    /// in `Requesting`.
    pub(crate) fn begin_processing(&self) -> bool {
        let mut slot = self.lock();
        if slot.state != ResultState::Requesting {
            return false;
        }
        slot.state = ResultState::Processing;
        true
    }

    /// Publish the terminal result and wake waiters. Returns `false`, and
    /// changes nothing, if a result was already published.
    pub(crate) fn complete(&self, result: NavResult) -> bool {
        let mut slot = self.lock();
        if slot.state.is_terminal() {
            return false;
        }
        slot.state = result.state();
        slot.result = Some(Arc::new(result));
        drop(slot);
        self.completed.notify_all();
        true
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RequestHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandle")
            .field("begin", &self.request.begin())
            .field("end", &self.request.end())
            .field("state", &self.state())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
