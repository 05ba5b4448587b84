//! Worker threads draining the shared request queue.
//!
//! Each worker waits on the lifecycle while the service is idle, takes
//! one handle at a time from the queue while it is running, runs the
//! search to completion, and exits once the service stops. A handle
//! received just as the host pauses is held, not run, until the service
//! runs again; if it stops instead, the held handle is cancelled.
//!
//! Every state change is published to the worker's [`WorkerSlot`] so
//! shutdown can wait for all of them to report stopped.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use gridnav_core::NavGrid;
use log::debug;

use crate::handle::RequestHandle;
use crate::lifecycle::{Lifecycle, ServiceState};
use crate::metrics::ServiceMetrics;
use crate::operation::SearchOperation;
use crate::result::{NavResult, Outcome};

/// Per-worker published state, padded to avoid false sharing.
#[repr(align(128))]
pub(crate) struct WorkerSlot {
    state: AtomicU8,
}

impl WorkerSlot {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(ServiceState::Initializing.as_raw()),
        }
    }

    pub(crate) fn state(&self) -> ServiceState {
        ServiceState::from_raw(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn publish(&self, state: ServiceState) {
        self.state.store(state.as_raw(), Ordering::Release);
    }
}

/// Everything a worker shares with the service.
pub(crate) struct WorkerContext {
    pub(crate) grid: Arc<dyn NavGrid>,
    pub(crate) lifecycle: Arc<Lifecycle>,
    pub(crate) queue: Receiver<Arc<RequestHandle>>,
    pub(crate) metrics: Arc<ServiceMetrics>,
    pub(crate) slots: Arc<[WorkerSlot]>,
    pub(crate) idle_poll: Duration,
}

/// Main loop for worker `index`. Returns once the service is stopped or
/// the queue is disconnected.
pub(crate) fn worker_loop(ctx: WorkerContext, index: usize) {
    let slot = &ctx.slots[index];
    debug!("worker {index} started");
    loop {
        let state = ctx.lifecycle.wait_while_idle(ctx.idle_poll);
        slot.publish(state);
        match state {
            ServiceState::Stopped => break,
            ServiceState::Initializing | ServiceState::Paused => continue,
            ServiceState::Running => {}
        }
        let handle = match ctx.queue.recv_timeout(ctx.idle_poll) {
            Ok(handle) => handle,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        ctx.metrics.record_dequeued();
        // The host may have paused while this worker sat in the queue wait.
        if hold_until_running(&ctx, slot) == ServiceState::Stopped {
            let result = NavResult::new(Outcome::Cancelled(None), Duration::ZERO);
            let state = result.state();
            if handle.complete(result) {
                ctx.metrics.record_completion(state, Duration::ZERO);
            }
            break;
        }
        let summary = SearchOperation::new(ctx.grid.as_ref(), handle).run();
        ctx.metrics.record_completion(summary.state, summary.elapsed);
    }
    slot.publish(ServiceState::Stopped);
    debug!("worker {index} exiting");
}

/// Block while the service is idle. Returns `Running` or `Stopped`.
fn hold_until_running(ctx: &WorkerContext, slot: &WorkerSlot) -> ServiceState {
    let mut state = ctx.lifecycle.state();
    while state.is_idle() {
        slot.publish(state);
        state = ctx.lifecycle.wait_while_idle(ctx.idle_poll);
    }
    slot.publish(state);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::result::ResultState;
    use gridnav_space::TileGrid;
    use std::thread;

    fn context(
        lifecycle: &Arc<Lifecycle>,
        queue: Receiver<Arc<RequestHandle>>,
        slots: &Arc<[WorkerSlot]>,
    ) -> WorkerContext {
        context_polling(lifecycle, queue, slots, Duration::from_millis(5))
    }

    fn context_polling(
        lifecycle: &Arc<Lifecycle>,
        queue: Receiver<Arc<RequestHandle>>,
        slots: &Arc<[WorkerSlot]>,
        idle_poll: Duration,
    ) -> WorkerContext {
        WorkerContext {
            grid: Arc::new(TileGrid::new(6, 6, 3).unwrap()),
            lifecycle: Arc::clone(lifecycle),
            queue,
            metrics: Arc::new(ServiceMetrics::default()),
            slots: Arc::clone(slots),
            idle_poll,
        }
    }

    // ── Pausing mid queue wait ──────────────────────────────────

    /// A running worker parked in a long queue wait, so a pause lands
    /// before the next handle arrives.
    fn parked_worker() -> (
        Arc<Lifecycle>,
        Arc<[WorkerSlot]>,
        crossbeam_channel::Sender<Arc<RequestHandle>>,
        Receiver<Arc<RequestHandle>>,
        thread::JoinHandle<()>,
    ) {
        let lifecycle = Arc::new(Lifecycle::new());
        lifecycle.start();
        lifecycle.set_ticking(true);
        let slots: Arc<[WorkerSlot]> = Arc::from(vec![WorkerSlot::new()]);
        let (tx, rx) = crossbeam_channel::unbounded();
        let ctx = context_polling(&lifecycle, rx.clone(), &slots, Duration::from_millis(500));
        let worker = thread::spawn(move || worker_loop(ctx, 0));
        while slots[0].state() != ServiceState::Running {
            thread::sleep(Duration::from_millis(1));
        }
        thread::sleep(Duration::from_millis(20));
        (lifecycle, slots, tx, rx, worker)
    }

    #[test]
    fn handle_received_after_pause_waits_for_running() {
        let grid = TileGrid::new(6, 6, 3).unwrap();
        let (lifecycle, _slots, tx, _rx, worker) = parked_worker();

        assert_eq!(lifecycle.set_ticking(false), ServiceState::Paused);
        let handle = Arc::new(RequestHandle::resolve(&grid, Request::euclidean((0, 0), (5, 5))));
        tx.send(Arc::clone(&handle)).unwrap();

        assert!(handle.wait_timeout(Duration::from_millis(200)).is_none());
        assert_eq!(handle.state(), ResultState::Requesting);

        lifecycle.set_ticking(true);
        assert_eq!(handle.wait().state(), ResultState::CompletedWithValidPath);

        lifecycle.stop();
        worker.join().unwrap();
    }

    #[test]
    fn handle_held_through_stop_is_never_run() {
        let grid = TileGrid::new(6, 6, 3).unwrap();
        let (lifecycle, slots, tx, rx, worker) = parked_worker();

        lifecycle.set_ticking(false);
        let handle = Arc::new(RequestHandle::resolve(&grid, Request::euclidean((0, 0), (5, 5))));
        tx.send(Arc::clone(&handle)).unwrap();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(handle.state(), ResultState::Requesting);

        lifecycle.stop();
        worker.join().unwrap();
        assert_eq!(slots[0].state(), ServiceState::Stopped);
        // Either the worker held it and cancelled it, or it is still queued
        // for the service's drain. It never ran.
        match handle.state() {
            ResultState::CompletedWithCancellation => assert!(rx.is_empty()),
            ResultState::Requesting => assert_eq!(rx.len(), 1),
            other => panic!("held handle ended as {other}"),
        }
    }

    #[test]
    fn worker_processes_while_running_and_exits_on_stop() {
        let grid = TileGrid::new(6, 6, 3).unwrap();
        let lifecycle = Arc::new(Lifecycle::new());
        let slots: Arc<[WorkerSlot]> = Arc::from(vec![WorkerSlot::new()]);
        let (tx, rx) = crossbeam_channel::unbounded();
        let ctx = context(&lifecycle, rx, &slots);
        let worker = thread::spawn(move || worker_loop(ctx, 0));

        let handle = Arc::new(RequestHandle::resolve(&grid, Request::euclidean((0, 0), (5, 5))));
        tx.send(Arc::clone(&handle)).unwrap();

        lifecycle.start();
        // Paused: nothing is taken off the queue.
        assert!(handle.wait_timeout(Duration::from_millis(30)).is_none());
        assert_eq!(handle.state(), ResultState::Requesting);

        lifecycle.set_ticking(true);
        let result = handle.wait();
        assert_eq!(result.state(), ResultState::CompletedWithValidPath);

        lifecycle.stop();
        worker.join().unwrap();
        assert_eq!(slots[0].state(), ServiceState::Stopped);
    }

    #[test]
    fn disconnected_queue_ends_worker() {
        let lifecycle = Arc::new(Lifecycle::new());
        lifecycle.start();
        lifecycle.set_ticking(true);
        let slots: Arc<[WorkerSlot]> = Arc::from(vec![WorkerSlot::new()]);
        let (tx, rx) = crossbeam_channel::unbounded::<Arc<RequestHandle>>();
        drop(tx);
        worker_loop(context(&lifecycle, rx, &slots), 0);
        assert_eq!(slots[0].state(), ServiceState::Stopped);
    }
}
