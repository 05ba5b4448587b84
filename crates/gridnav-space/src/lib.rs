//! Tile grid backend for gridnav.
//!
//! [`TileGrid`] is a bounded square grid with walls, doors on cardinal
//! edges, entity occupancy, and fixed-size square regions whose spawn
//! state the host can change while searches are running. It implements
//! [`NavGrid`](gridnav_core::NavGrid) and is the grid used throughout
//! the gridnav tests and benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub(crate) mod grid2d;
pub mod tile_grid;

pub use error::GridError;
pub use tile_grid::TileGrid;
