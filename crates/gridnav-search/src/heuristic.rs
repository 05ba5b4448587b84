//! Cost-to-goal estimators.
//!
//! A [`Heuristic`] is instantiated fresh for every search, bound to the
//! goal cell and the request's [`CostModifiers`] by
//! [`Heuristic::initialize`], and then queried for the estimated cost
//! from any cell to the goal. Every built-in heuristic is admissible for
//! the diagonal policy it is listed against in [`HeuristicKind`].

use std::fmt;
use std::sync::Arc;

use gridnav_core::{Cell, CostModifiers, NavGrid, Position};

use crate::edge_cost::obstacle_penalty;

/// Estimates the remaining cost from a cell to the bound goal.
///
/// Implementations must be admissible: the estimate for a cell may never
/// exceed the true cheapest cost from that cell to the goal. The search
/// returns optimal paths only under that condition.
pub trait Heuristic: Send {
    /// Bind the goal and cost modifiers for one search.
    fn initialize(&mut self, goal: &Cell, modifiers: &CostModifiers);

    /// The goal position bound by the last [`initialize`](Self::initialize).
    fn goal(&self) -> Position;

    /// The cost modifiers bound by the last [`initialize`](Self::initialize).
    fn modifiers(&self) -> &CostModifiers;

    /// Distance-only estimate from `position` to the goal.
    fn distance(&self, position: Position) -> f32;

    /// Estimated cost from `cell` to the bound goal.
    fn estimate(&self, cell: &Cell) -> f32 {
        self.distance(cell.position)
    }

    /// Estimated cost of moving from `begin` to `end`.
    ///
    /// For adjacent cells this adds the obstacle penalty of the step to
    /// the distance from `begin` to the goal. Non-adjacent pairs get the
    /// distance estimate alone.
    fn estimate_between(&self, grid: &dyn NavGrid, begin: &Cell, end: &Cell) -> f32 {
        let distance = self.distance(begin.position);
        match begin.position.direction_to(end.position) {
            Some(direction) => {
                distance + obstacle_penalty(grid.collision(begin, direction), self.modifiers())
            }
            None => distance,
        }
    }
}

/// Goal and modifiers shared by the built-in heuristics.
#[derive(Clone, Copy, Debug, Default)]
struct Binding {
    goal: Position,
    modifiers: CostModifiers,
}

macro_rules! distance_heuristic {
    ($(#[$doc:meta])* $name:ident, |$from:ident, $to:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name {
            binding: Binding,
        }

        impl Heuristic for $name {
            fn initialize(&mut self, goal: &Cell, modifiers: &CostModifiers) {
                self.binding = Binding {
                    goal: goal.position,
                    modifiers: *modifiers,
                };
            }

            fn goal(&self) -> Position {
                self.binding.goal
            }

            fn modifiers(&self) -> &CostModifiers {
                &self.binding.modifiers
            }

            fn distance(&self, $from: Position) -> f32 {
                let $to = self.binding.goal;
                $body
            }
        }
    };
}

distance_heuristic!(
    /// Straight-line distance. Admissible under every diagonal policy.
    EuclideanHeuristic,
    |from, to| from.euclidean(to)
);

distance_heuristic!(
    /// Octile distance: diagonal moves cost `√2`, cardinal moves 1.
    /// Admissible under every diagonal policy and tighter than Euclidean.
    OctileHeuristic,
    |from, to| from.octile(to)
);

distance_heuristic!(
    /// Manhattan distance. Admissible only when diagonal moves are
    /// disabled.
    ManhattanHeuristic,
    |from, to| from.manhattan(to) as f32
);

distance_heuristic!(
    /// Always zero. Turns the search into Dijkstra's algorithm.
    ZeroHeuristic,
    |_from, _to| 0.0
);

/// Builds a fresh custom heuristic for each search.
pub type HeuristicFactory = Arc<dyn Fn() -> Box<dyn Heuristic> + Send + Sync>;

/// Which heuristic a request uses.
#[derive(Clone, Default)]
pub enum HeuristicKind {
    /// [`EuclideanHeuristic`].
    #[default]
    Euclidean,
    /// [`OctileHeuristic`].
    Octile,
    /// [`ManhattanHeuristic`]. Use with diagonals disabled.
    Manhattan,
    /// [`ZeroHeuristic`].
    Zero,
    /// A caller-provided heuristic. The factory is called once per
    /// search so no state leaks between requests.
    Custom(HeuristicFactory),
}

impl HeuristicKind {
    /// Build an unbound heuristic of this kind.
    pub fn instantiate(&self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Euclidean => Box::new(EuclideanHeuristic::default()),
            HeuristicKind::Octile => Box::new(OctileHeuristic::default()),
            HeuristicKind::Manhattan => Box::new(ManhattanHeuristic::default()),
            HeuristicKind::Zero => Box::new(ZeroHeuristic::default()),
            HeuristicKind::Custom(factory) => factory(),
        }
    }

    /// Build a heuristic of this kind already bound to `goal`.
    pub fn bind(&self, goal: &Cell, modifiers: &CostModifiers) -> Box<dyn Heuristic> {
        let mut heuristic = self.instantiate();
        heuristic.initialize(goal, modifiers);
        heuristic
    }
}

impl fmt::Debug for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicKind::Euclidean => write!(f, "Euclidean"),
            HeuristicKind::Octile => write!(f, "Octile"),
            HeuristicKind::Manhattan => write!(f, "Manhattan"),
            HeuristicKind::Zero => write!(f, "Zero"),
            HeuristicKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
