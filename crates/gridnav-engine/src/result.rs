//! Result states and terminal payloads.

use std::fmt;
use std::time::Duration;

use gridnav_core::NavError;
use gridnav_search::{Path, SearchDiagnostics, SearchOutcome};

/// Where a request is in its life.
///
/// `Requesting → Processing → Completed*`. The five `Completed*` states
/// are terminal and mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultState {
    /// Queued, not yet picked up by a worker.
    Requesting,
    /// A worker is running the search.
    Processing,
    /// A path was found.
    CompletedWithValidPath,
    /// No path exists between the endpoints.
    CompletedWithInvalidPath,
    /// The request was cancelled.
    CompletedWithCancellation,
    /// The search ran out of time.
    CompletedWithTimeout,
    /// The request failed with an error.
    CompletedWithException,
}

impl ResultState {
    /// Whether this is one of the `Completed*` states.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ResultState::Requesting | ResultState::Processing)
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultState::Requesting => "requesting",
            ResultState::Processing => "processing",
            ResultState::CompletedWithValidPath => "completed with valid path",
            ResultState::CompletedWithInvalidPath => "completed with invalid path",
            ResultState::CompletedWithCancellation => "completed with cancellation",
            ResultState::CompletedWithTimeout => "completed with timeout",
            ResultState::CompletedWithException => "completed with exception",
        };
        f.write_str(name)
    }
}

/// Terminal payload of a request.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The cheapest path.
    ValidPath(Path),
    /// No path exists. Diagnostics are kept when debugging.
    InvalidPath(Option<SearchDiagnostics>),
    /// Cancelled before completion. Diagnostics are kept when debugging.
    Cancelled(Option<SearchDiagnostics>),
    /// The time limit elapsed.
    TimedOut {
        /// The request's limit.
        limit: Duration,
        /// Search time when the limit was detected.
        elapsed: Duration,
    },
    /// The request failed.
    Exception(NavError),
}

impl Outcome {
    /// The terminal state this outcome corresponds to.
    pub fn state(&self) -> ResultState {
        match self {
            Outcome::ValidPath(_) => ResultState::CompletedWithValidPath,
            Outcome::InvalidPath(_) => ResultState::CompletedWithInvalidPath,
            Outcome::Cancelled(_) => ResultState::CompletedWithCancellation,
            Outcome::TimedOut { .. } => ResultState::CompletedWithTimeout,
            Outcome::Exception(_) => ResultState::CompletedWithException,
        }
    }
}

impl From<SearchOutcome> for Outcome {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(path) => Outcome::ValidPath(path),
            SearchOutcome::Exhausted(d) => Outcome::InvalidPath(d),
            SearchOutcome::Cancelled(d) => Outcome::Cancelled(d),
            SearchOutcome::TimedOut { limit, elapsed } => Outcome::TimedOut { limit, elapsed },
        }
    }
}

impl From<NavError> for Outcome {
    fn from(error: NavError) -> Self {
        Outcome::Exception(error)
    }
}

/// A completed request.
#[derive(Clone, Debug)]
pub struct NavResult {
    outcome: Outcome,
    elapsed: Duration,
}

impl NavResult {
    /// Wrap an outcome with the wall time the operation took.
    pub fn new(outcome: Outcome, elapsed: Duration) -> Self {
        Self { outcome, elapsed }
    }

    /// The terminal state.
    pub fn state(&self) -> ResultState {
        self.outcome.state()
    }

    /// The payload.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Whether a path was found.
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::ValidPath(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::ValidPath(path) => Some(path),
            _ => None,
        }
    }

    /// The error, if the request failed.
    pub fn error(&self) -> Option<&NavError> {
        match &self.outcome {
            Outcome::Exception(e) => Some(e),
            _ => None,
        }
    }

    /// Open and closed lists, if the request was debugging.
    pub fn diagnostics(&self) -> Option<&SearchDiagnostics> {
        match &self.outcome {
            Outcome::ValidPath(path) => path.diagnostics(),
            Outcome::InvalidPath(d) | Outcome::Cancelled(d) => d.as_ref(),
            Outcome::TimedOut { .. } | Outcome::Exception(_) => None,
        }
    }

    /// Wall time from the operation starting to its completion. Zero for
    /// requests that never reached a worker.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
