//! Best-first path search over a lazily built grid connection graph.
//!
//! A search is described by a [`SearchContext`]: the grid, the begin and
//! end cells, a freshly instantiated [`Heuristic`], an [`EdgeCost`]
//! function, and a cancellation/timeout [`Budget`]. [`search()`]
//! consumes the context and returns a [`SearchOutcome`].
//!
//! # Components
//!
//! - [`heuristic`]: admissible cost-to-goal estimators
//! - [`edge_cost`]: real traversal cost of a single step
//! - [`graph`]: per-cell outgoing [`Connection`]s
//! - [`priority`]: the open and closed [`PriorityList`]s of [`NodeRecord`]s
//! - [`search`](mod@search): the search loop itself

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod budget;
pub mod connection;
pub mod edge_cost;
pub mod graph;
pub mod heuristic;
pub mod path;
pub mod priority;
pub mod record;
pub mod search;

pub use budget::{Budget, Checkpoint};
pub use connection::Connection;
pub use edge_cost::{obstacle_penalty, EdgeCost, ObstacleEdgeCost};
pub use graph::ConnectionGraph;
pub use heuristic::{
    EuclideanHeuristic, Heuristic, HeuristicFactory, HeuristicKind, ManhattanHeuristic,
    OctileHeuristic, ZeroHeuristic,
};
pub use path::{Path, PathDrawer, SearchDiagnostics};
pub use priority::PriorityList;
pub use record::NodeRecord;
pub use search::{search, SearchContext, SearchOutcome, SearchSettings};
