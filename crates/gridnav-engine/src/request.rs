//! Immutable search requests.

use std::time::Duration;

use gridnav_core::{CostModifiers, DiagonalPolicy, Position};
use gridnav_search::{HeuristicKind, SearchSettings};

/// Default search time limit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// A path search between two grid coordinates.
///
/// Built with [`Request::new`] or [`Request::euclidean`] and refined with
/// the `with_*` methods. Once submitted it is shared read-only between the
/// submitter and the worker.
#[derive(Clone, Debug)]
pub struct Request {
    begin: Position,
    end: Position,
    modifiers: CostModifiers,
    heuristic: HeuristicKind,
    diagonals: DiagonalPolicy,
    timeout: Duration,
    debugging: bool,
}

impl Request {
    /// Search from `begin` to `end` with default settings: Euclidean
    /// heuristic, door 10 / entity 5 penalties, strict diagonals, a
    /// 1000 ms limit, and debugging off.
    pub fn new(begin: impl Into<Position>, end: impl Into<Position>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
            modifiers: CostModifiers::default(),
            heuristic: HeuristicKind::Euclidean,
            diagonals: DiagonalPolicy::Strict,
            timeout: DEFAULT_TIMEOUT,
            debugging: false,
        }
    }

    /// Search with the Euclidean heuristic and default settings.
    pub fn euclidean(begin: impl Into<Position>, end: impl Into<Position>) -> Self {
        Self::new(begin, end).with_heuristic(HeuristicKind::Euclidean)
    }

    /// Replace the door and entity penalties.
    pub fn with_modifiers(mut self, modifiers: CostModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the heuristic.
    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replace the diagonal policy.
    pub fn with_diagonals(mut self, diagonals: DiagonalPolicy) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Replace the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the time limit, in milliseconds.
    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Keep the final open and closed lists on the result.
    pub fn with_debugging(mut self, debugging: bool) -> Self {
        self.debugging = debugging;
        self
    }

    /// Begin coordinate.
    pub fn begin(&self) -> Position {
        self.begin
    }

    /// End coordinate.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Door and entity penalties.
    pub fn modifiers(&self) -> &CostModifiers {
        &self.modifiers
    }

    /// Heuristic to instantiate for the search.
    pub fn heuristic(&self) -> &HeuristicKind {
        &self.heuristic
    }

    /// Diagonal policy.
    pub fn diagonals(&self) -> DiagonalPolicy {
        self.diagonals
    }

    /// Time limit for the search loop.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether diagnostics are kept.
    pub fn debugging(&self) -> bool {
        self.debugging
    }

    /// The search settings this request describes.
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            heuristic: self.heuristic.clone(),
            modifiers: self.modifiers,
            diagonals: self.diagonals,
            timeout: self.timeout,
            debugging: self.debugging,
        }
    }
}
