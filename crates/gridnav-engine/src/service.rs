//! User-facing [`NavigationService`] and its shutdown sequence.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use gridnav_core::{NavError, NavGrid};
use log::{debug, info, trace, warn};

use crate::config::{ConfigError, ServiceConfig};
use crate::handle::RequestHandle;
use crate::lifecycle::{Lifecycle, ServiceState};
use crate::metrics::{MetricsSnapshot, ServiceMetrics};
use crate::request::Request;
use crate::result::{NavResult, Outcome};
use crate::worker::{self, WorkerContext, WorkerSlot};

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`NavigationService::shutdown`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Total time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Number of worker threads joined.
    pub workers_joined: usize,
    /// Workers that did not report stopped within the shutdown budget and
    /// were detached.
    pub workers_detached: usize,
    /// Queued requests completed as cancelled because no worker took them.
    pub drained_requests: usize,
}

// ── NavigationService ────────────────────────────────────────────

/// Dispatches path searches to a pool of worker threads.
///
/// Created in [`ServiceState::Initializing`] with its workers already
/// spawned and idle. [`start`](Self::start) moves it to `Paused`; the host
/// then toggles `Paused ⇄ Running` with [`set_ticking`](Self::set_ticking).
/// Requests may be submitted in any state before shutdown; they wait in
/// the queue until the service runs.
pub struct NavigationService {
    grid: Arc<dyn NavGrid>,
    lifecycle: Arc<Lifecycle>,
    queue_tx: Sender<Arc<RequestHandle>>,
    queue_rx: Receiver<Arc<RequestHandle>>,
    worker_threads: Vec<JoinHandle<()>>,
    worker_slots: Arc<[WorkerSlot]>,
    metrics: Arc<ServiceMetrics>,
    config: ServiceConfig,
    shut_down: bool,
}

// Compile-time assertion: the service is shared across submitter threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<NavigationService>();
};

impl NavigationService {
    /// Validate `config` and spawn the worker pool.
    pub fn new(grid: Arc<dyn NavGrid>, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let worker_count = config.resolved_worker_count();
        let (queue_tx, queue_rx) = match config.queue_capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        let lifecycle = Arc::new(Lifecycle::new());
        let metrics = Arc::new(ServiceMetrics::default());
        let worker_slots: Arc<[WorkerSlot]> = (0..worker_count).map(|_| WorkerSlot::new()).collect();

        let mut service = Self {
            grid,
            lifecycle,
            queue_tx,
            queue_rx,
            worker_threads: Vec::with_capacity(worker_count),
            worker_slots,
            metrics,
            config,
            shut_down: false,
        };
        for i in 0..worker_count {
            let ctx = WorkerContext {
                grid: Arc::clone(&service.grid),
                lifecycle: Arc::clone(&service.lifecycle),
                queue: service.queue_rx.clone(),
                metrics: Arc::clone(&service.metrics),
                slots: Arc::clone(&service.worker_slots),
                idle_poll: service.config.idle_poll(),
            };
            let spawned = thread::Builder::new()
                .name(format!("gridnav-worker-{i}"))
                .spawn(move || worker::worker_loop(ctx, i));
            match spawned {
                Ok(handle) => service.worker_threads.push(handle),
                Err(e) => {
                    for slot in &service.worker_slots[i..] {
                        slot.publish(ServiceState::Stopped);
                    }
                    service.shutdown();
                    return Err(ConfigError::ThreadSpawnFailed {
                        reason: format!("gridnav-worker-{i}: {e}"),
                    });
                }
            }
        }
        debug!("spawned {worker_count} navigation workers");
        Ok(service)
    }

    /// `Initializing → Paused`.
    pub fn start(&self) {
        if self.lifecycle.start() {
            info!(
                "navigation service started with {} workers",
                self.worker_threads.len()
            );
        }
    }

    /// Mirror the host's tick state: `true` runs the workers, `false`
    /// pauses them. Ignored before [`start`](Self::start) and after
    /// shutdown.
    pub fn set_ticking(&self, ticking: bool) -> ServiceState {
        self.lifecycle.set_ticking(ticking)
    }

    /// Current service state.
    pub fn state(&self) -> ServiceState {
        self.lifecycle.state()
    }

    /// Submit a request and return its handle immediately.
    ///
    /// Requests whose endpoints do not resolve, that arrive after
    /// shutdown, or that find a bounded queue full are returned already
    /// completed with [`ResultState::CompletedWithException`](crate::ResultState::CompletedWithException)
    /// and never reach a worker.
    pub fn process(&self, request: Request) -> Arc<RequestHandle> {
        self.metrics.record_submitted();
        let handle = Arc::new(RequestHandle::resolve(self.grid.as_ref(), request));
        if let Some(result) = handle.result() {
            self.reject_logged(&handle, &result);
            return handle;
        }
        if self.lifecycle.state() == ServiceState::Stopped {
            return self.reject(handle, NavError::ServiceStopped);
        }
        match self.queue_tx.try_send(Arc::clone(&handle)) {
            Ok(()) => {
                trace!(
                    "queued request {} -> {}",
                    handle.request().begin(),
                    handle.request().end()
                );
                handle
            }
            Err(TrySendError::Full(_)) => self.reject(handle, NavError::QueueFull),
            Err(TrySendError::Disconnected(_)) => self.reject(handle, NavError::ServiceStopped),
        }
    }

    /// Submit a request and poll it once per host frame until it
    /// completes.
    ///
    /// The calling thread never parks here: `next_frame` is called between
    /// polls and must yield to the host until its next frame. A no-op
    /// `next_frame` turns this into a busy spin; use
    /// [`process_blocking`](Self::process_blocking) to park instead.
    pub fn process_async(&self, request: Request, mut next_frame: impl FnMut()) -> Arc<NavResult> {
        let handle = self.process(request);
        loop {
            if let Some(result) = handle.result() {
                return result;
            }
            next_frame();
        }
    }

    /// Submit a request and block the calling thread until it completes.
    pub fn process_blocking(&self, request: Request) -> Arc<NavResult> {
        self.process(request).wait()
    }

    /// Counter snapshot.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// State each worker last reported.
    pub fn worker_states(&self) -> Vec<ServiceState> {
        self.worker_slots.iter().map(WorkerSlot::state).collect()
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.worker_slots.len()
    }

    /// Requests waiting for a worker.
    pub fn queue_len(&self) -> usize {
        self.queue_tx.len()
    }

    /// The grid searched by this service.
    pub fn grid(&self) -> &Arc<dyn NavGrid> {
        &self.grid
    }

    /// Stop the service, wait for workers, and cancel anything still
    /// queued.
    ///
    /// Workers finish the search they are running. Those that do not
    /// report stopped within `shutdown_timeout_ms` are detached rather
    /// than joined. Idempotent; also called on drop.
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.shut_down {
            return ShutdownReport::default();
        }
        self.shut_down = true;
        let start = Instant::now();
        self.lifecycle.stop();

        let deadline = start + self.config.shutdown_timeout();
        while !self.all_workers_stopped() {
            if Instant::now() > deadline {
                warn!(
                    "workers did not stop within {}ms",
                    self.config.shutdown_timeout_ms
                );
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }

        let mut workers_joined = 0;
        let mut workers_detached = 0;
        for (slot, handle) in self.worker_slots.iter().zip(self.worker_threads.drain(..)) {
            if slot.state() != ServiceState::Stopped {
                workers_detached += 1;
                continue;
            }
            if handle.join().is_ok() {
                workers_joined += 1;
            }
        }

        let mut drained_requests = 0;
        while let Ok(handle) = self.queue_rx.try_recv() {
            let result = NavResult::new(Outcome::Cancelled(None), Duration::ZERO);
            let state = result.state();
            if handle.complete(result) {
                self.metrics.record_completion(state, Duration::ZERO);
                drained_requests += 1;
            }
        }

        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            workers_joined,
            workers_detached,
            drained_requests,
        };
        info!(
            "navigation service stopped: {} workers joined, {} detached, {} queued requests cancelled",
            report.workers_joined, report.workers_detached, report.drained_requests
        );
        report
    }

    fn all_workers_stopped(&self) -> bool {
        self.worker_slots
            .iter()
            .all(|slot| slot.state() == ServiceState::Stopped)
    }

    fn reject(&self, handle: Arc<RequestHandle>, error: NavError) -> Arc<RequestHandle> {
        handle.complete(NavResult::new(Outcome::Exception(error), Duration::ZERO));
        if let Some(result) = handle.result() {
            self.reject_logged(&handle, &result);
        }
        handle
    }

    fn reject_logged(&self, handle: &RequestHandle, result: &NavResult) {
        self.metrics.record_rejected();
        if let Some(e) = result.error() {
            debug!(
                "rejected request {} -> {}: {e}",
                handle.request().begin(),
                handle.request().end()
            );
        }
    }
}

impl Drop for NavigationService {
    fn drop(&mut self) {
        if !self.shut_down {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationService")
            .field("state", &self.state())
            .field("workers", &self.worker_slots.len())
            .field("queued", &self.queue_len())
            .finish()
    }
}
