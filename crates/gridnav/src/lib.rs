//! Gridnav: best-first path search on tile grids, with a worker-pool
//! service for running many searches concurrently.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gridnav sub-crates. For most users, adding `gridnav` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use gridnav::prelude::*;
//!
//! // A 5×5 grid with a wall down column 2, open only at the bottom row.
//! let mut grid = TileGrid::new(5, 5, 4).unwrap();
//! for y in 0..4 {
//!     grid.set_wall(Position::new(2, y), true).unwrap();
//! }
//!
//! let mut service = NavigationService::new(Arc::new(grid), ServiceConfig::default()).unwrap();
//! service.start();
//! service.set_ticking(true);
//!
//! let result = service.process_blocking(Request::euclidean((0, 0), (4, 0)));
//! assert_eq!(result.state(), ResultState::CompletedWithValidPath);
//!
//! let path = result.path().unwrap();
//! assert!(path.positions().contains(&Position::new(2, 4)));
//! assert_eq!(path.positions().last(), Some(&Position::new(4, 0)));
//!
//! service.shutdown();
//! ```
//!
//! A single search can also run on the calling thread:
//!
//! ```rust
//! use std::sync::atomic::AtomicBool;
//! use gridnav::prelude::*;
//!
//! let grid = TileGrid::new(4, 4, 4).unwrap();
//! let begin = grid.try_get_cell(Position::new(0, 0)).unwrap();
//! let end = grid.try_get_cell(Position::new(3, 0)).unwrap();
//! let cancel = AtomicBool::new(false);
//!
//! let ctx = SearchContext::new(&grid, begin, end, &SearchSettings::default(), &cancel);
//! let outcome = search(ctx).unwrap();
//! assert_eq!(outcome.path().map(|p| p.cost()), Some(3.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridnav-core` | Positions, cells, cost modifiers, errors, the grid trait |
//! | [`space`] | `gridnav-space` | The `TileGrid` backend |
//! | [`search`](mod@search) | `gridnav-search` | Heuristics, connections, priority lists, the search loop |
//! | [`engine`] | `gridnav-engine` | Requests, handles, results, and the navigation service |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`gridnav-core`).
///
/// Contains [`types::Position`], [`types::Cell`], [`types::NavError`] and
/// the [`types::NavGrid`] trait every grid backend implements.
pub use gridnav_core as types;

/// Tile grid backend (`gridnav-space`).
pub use gridnav_space as space;

/// Path search (`gridnav-search`).
///
/// [`search::search()`] runs one search described by a
/// [`search::SearchContext`]. Heuristics are chosen through
/// [`search::HeuristicKind`].
pub use gridnav_search as search;

/// Concurrent dispatch (`gridnav-engine`).
///
/// [`engine::NavigationService`] owns the worker pool and hands out
/// [`engine::RequestHandle`]s.
pub use gridnav_engine as engine;

/// Common imports for typical gridnav usage.
///
/// ```rust
/// use gridnav::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use gridnav_core::{
        Cell, CostModifiers, DiagonalPolicy, Direction, NavError, NavGrid, Position, RegionId,
        SpawnState,
    };

    // Space
    pub use gridnav_space::{GridError, TileGrid};

    // Search
    pub use gridnav_search::{
        search, HeuristicKind, Path, PathDrawer, SearchContext, SearchOutcome, SearchSettings,
    };

    // Engine
    pub use gridnav_engine::{
        NavResult, NavigationService, Outcome, Request, RequestHandle, ResultState,
        ServiceConfig, ServiceState,
    };
}
