//! Pause, resume, and shutdown as driven by a host.

use std::sync::Arc;
use std::time::Duration;

use gridnav_core::NavError;
use gridnav_engine::{NavigationService, Request, ResultState, ServiceConfig, ServiceState};
use gridnav_test_utils::open_grid;

fn service() -> NavigationService {
    let config = ServiceConfig {
        worker_count: Some(2),
        idle_poll_ms: 5,
        shutdown_timeout_ms: 2000,
        ..ServiceConfig::default()
    };
    NavigationService::new(Arc::new(open_grid(10, 10)), config).unwrap()
}

#[test]
fn workers_report_host_state() {
    let mut svc = service();
    svc.start();
    svc.set_ticking(true);
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while !svc.worker_states().iter().all(|s| *s == ServiceState::Running) {
        assert!(std::time::Instant::now() < deadline, "workers never ran");
        std::thread::sleep(Duration::from_millis(2));
    }
    svc.set_ticking(false);
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while !svc.worker_states().iter().all(|s| *s == ServiceState::Paused) {
        assert!(std::time::Instant::now() < deadline, "workers never paused");
        std::thread::sleep(Duration::from_millis(2));
    }
    let report = svc.shutdown();
    assert_eq!(report.workers_joined, 2);
    assert!(svc.worker_states().iter().all(|s| *s == ServiceState::Stopped));
}

#[test]
fn pausing_holds_queued_work() {
    let svc = service();
    svc.start();
    svc.set_ticking(true);
    assert!(svc.process_blocking(Request::euclidean((0, 0), (9, 9))).is_valid());

    svc.set_ticking(false);
    let held = svc.process(Request::euclidean((9, 9), (0, 0)));
    assert!(held.wait_timeout(Duration::from_millis(50)).is_none());
    assert_eq!(held.state(), ResultState::Requesting);

    svc.set_ticking(true);
    let result = held.wait();
    assert_eq!(result.state(), ResultState::CompletedWithValidPath);
    assert_eq!(result.path().unwrap().len(), 9);
}

#[test]
fn pause_during_queue_wait_holds_next_request() {
    let config = ServiceConfig {
        worker_count: Some(1),
        ..ServiceConfig::default()
    };
    let mut svc = NavigationService::new(Arc::new(open_grid(8, 8)), config).unwrap();
    svc.start();
    svc.set_ticking(true);
    // The worker is now parked in its queue wait for up to idle_poll_ms.
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(svc.set_ticking(false), ServiceState::Paused);

    let held = svc.process(Request::euclidean((0, 0), (7, 7)));
    assert!(held.wait_timeout(Duration::from_millis(300)).is_none());
    assert_eq!(held.state(), ResultState::Requesting);
    assert_eq!(svc.metrics().completed(), 0);

    svc.set_ticking(true);
    assert_eq!(held.wait().state(), ResultState::CompletedWithValidPath);
    svc.shutdown();
}

#[test]
fn ticking_before_start_is_ignored() {
    let svc = service();
    assert_eq!(svc.set_ticking(true), ServiceState::Initializing);
    let handle = svc.process(Request::euclidean((0, 0), (1, 1)));
    assert!(handle.wait_timeout(Duration::from_millis(30)).is_none());
    svc.start();
    svc.set_ticking(true);
    assert!(handle.wait().is_valid());
}

#[test]
fn stopped_service_rejects_submissions() {
    let mut svc = service();
    svc.start();
    svc.shutdown();
    assert_eq!(svc.state(), ServiceState::Stopped);
    assert_eq!(svc.set_ticking(true), ServiceState::Stopped);
    let handle = svc.process(Request::euclidean((0, 0), (1, 1)));
    assert_eq!(
        handle.result().unwrap().error(),
        Some(&NavError::ServiceStopped)
    );
}
