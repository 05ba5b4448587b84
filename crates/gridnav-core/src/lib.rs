//! Core types and the grid contract for gridnav path searches.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other gridnav crate: positions and
//! compass directions, cells and their owning regions, the
//! [`NavGrid`] trait through which searches read the world, the
//! per-request [`CostModifiers`] table, and the [`NavError`] taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod cost;
pub mod error;
pub mod grid;
pub mod position;

pub use cell::{Cell, CellId, RegionId, SpawnState};
pub use cost::CostModifiers;
pub use error::NavError;
pub use grid::{
    Collision, DiagonalPolicy, NavGrid, NeighborEntry, NeighborFilter, NeighborQuery, Neighbors,
};
pub use position::{Direction, Position};
