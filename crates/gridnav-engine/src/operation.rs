//! One search, run synchronously on the calling thread.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use gridnav_core::{NavError, NavGrid};
use gridnav_search::{search, SearchContext, SearchOutcome};
use log::{error, trace};

use crate::handle::RequestHandle;
use crate::result::{NavResult, Outcome, ResultState};

/// Runs a handle's search against a grid and publishes the result.
///
/// The operation owns nothing beyond the handle: the heuristic, graph,
/// and open/closed lists are built inside [`run`](Self::run) and dropped
/// when it returns.
pub struct SearchOperation<'g> {
    grid: &'g dyn NavGrid,
    handle: Arc<RequestHandle>,
}

impl<'g> SearchOperation<'g> {
    /// Bind a handle to the grid it will search.
    pub fn new(grid: &'g dyn NavGrid, handle: Arc<RequestHandle>) -> Self {
        Self { grid, handle }
    }

    /// Take the handle through `Processing` to a terminal state.
    ///
    /// Handles that are not `Requesting` (already failed at submission, or
    /// already run) are left untouched and their current state returned.
    /// Errors and panics inside the search become
    /// [`ResultState::CompletedWithException`]; they are logged here and
    /// never escape.
    pub fn run(self) -> RunSummary {
        if !self.handle.begin_processing() {
            return RunSummary {
                state: self.handle.state(),
                elapsed: Duration::ZERO,
            };
        }
        let started = Instant::now();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.execute())) {
            Ok(Ok(outcome)) => Outcome::from(outcome),
            Ok(Err(e)) => Outcome::Exception(e),
            Err(payload) => Outcome::Exception(NavError::WorkerPanicked {
                reason: panic_reason(payload.as_ref()),
            }),
        };
        let request = self.handle.request();
        if let Outcome::Exception(e) = &outcome {
            error!("request {} -> {} failed: {e}", request.begin(), request.end());
        }
        let state = outcome.state();
        let elapsed = started.elapsed();
        self.handle.complete(NavResult::new(outcome, elapsed));
        trace!(
            "request {} -> {} {state} in {}us",
            request.begin(),
            request.end(),
            elapsed.as_micros()
        );
        RunSummary { state, elapsed }
    }

    fn execute(&self) -> Result<SearchOutcome, NavError> {
        let request = self.handle.request();
        let begin = self.handle.begin().ok_or(NavError::InvalidBegin {
            begin: request.begin(),
            end: request.end(),
        })?;
        let end = self.handle.end().ok_or(NavError::InvalidEnd {
            begin: request.begin(),
            end: request.end(),
        })?;
        let settings = request.settings();
        let ctx = SearchContext::new(self.grid, begin, end, &settings, self.handle.cancel_flag());
        search(ctx)
    }
}

/// State and duration of a finished [`SearchOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The handle's state after the run.
    pub state: ResultState,
    /// Time spent in the operation. Zero if it did not run.
    pub elapsed: Duration,
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use gridnav_core::{
        Cell, Collision, Direction, NeighborQuery, Neighbors, Position, RegionId, SpawnState,
    };
    use gridnav_space::TileGrid;

    fn run(grid: &dyn NavGrid, request: Request) -> (Arc<RequestHandle>, RunSummary) {
        let handle = Arc::new(RequestHandle::resolve(grid, request));
        let summary = SearchOperation::new(grid, Arc::clone(&handle)).run();
        (handle, summary)
    }

    #[test]
    fn valid_path_completes() {
        let grid = TileGrid::new(5, 5, 5).unwrap();
        let (handle, summary) = run(&grid, Request::euclidean((0, 0), (4, 4)));
        assert_eq!(summary.state, ResultState::CompletedWithValidPath);
        let result = handle.result().unwrap();
        assert_eq!(result.path().unwrap().len(), 4);
        assert_eq!(result.elapsed(), summary.elapsed);
    }

    #[test]
    fn cancelled_before_run() {
        let grid = TileGrid::new(5, 5, 5).unwrap();
        let handle = Arc::new(RequestHandle::resolve(
            &grid,
            Request::euclidean((0, 0), (4, 4)).with_debugging(true),
        ));
        handle.cancel();
        let summary = SearchOperation::new(&grid, Arc::clone(&handle)).run();
        assert_eq!(summary.state, ResultState::CompletedWithCancellation);
        let result = handle.result().unwrap();
        assert!(result.path().is_none());
        assert_eq!(result.diagnostics().unwrap().open.len(), 1);
    }

    #[test]
    fn zero_timeout() {
        let grid = TileGrid::new(5, 5, 5).unwrap();
        let (handle, summary) = run(&grid, Request::euclidean((0, 0), (4, 4)).with_timeout_ms(0));
        assert_eq!(summary.state, ResultState::CompletedWithTimeout);
        match handle.result().unwrap().outcome() {
            Outcome::TimedOut { limit, elapsed } => {
                assert_eq!(*limit, Duration::ZERO);
                assert!(elapsed >= limit);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn failed_handles_are_not_rerun() {
        let grid = TileGrid::new(3, 3, 3).unwrap();
        let (handle, summary) = run(&grid, Request::euclidean((0, 0), (7, 7)));
        assert_eq!(summary.state, ResultState::CompletedWithException);
        assert_eq!(summary.elapsed, Duration::ZERO);
        assert!(matches!(handle.result().unwrap().error(), Some(NavError::InvalidEnd { .. })));
    }

    /// Grid that panics when asked for neighbours.
    struct Exploding(TileGrid);

    impl NavGrid for Exploding {
        fn try_get_cell(&self, position: Position) -> Option<Cell> {
            self.0.try_get_cell(position)
        }
        fn neighbors(&self, _cell: &Cell, _query: &NeighborQuery) -> Neighbors {
            panic!("neighbour storage corrupted")
        }
        fn collision(&self, cell: &Cell, direction: Direction) -> Collision {
            self.0.collision(cell, direction)
        }
        fn spawn_state(&self, region: RegionId) -> Option<SpawnState> {
            self.0.spawn_state(region)
        }
    }

    #[test]
    fn panics_become_exceptions() {
        let grid = Exploding(TileGrid::new(3, 3, 3).unwrap());
        let (handle, summary) = run(&grid, Request::euclidean((0, 0), (2, 2)));
        assert_eq!(summary.state, ResultState::CompletedWithException);
        assert_eq!(
            handle.result().unwrap().error(),
            Some(&NavError::WorkerPanicked {
                reason: "neighbour storage corrupted".into()
            })
        );
    }
}
