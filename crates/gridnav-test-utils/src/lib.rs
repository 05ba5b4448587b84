//! Test utilities for gridnav development.
//!
//! [`fixtures`] builds tile grids for common scenarios; [`oracle`] is an
//! independent Dijkstra used to check that searches return cheapest
//! paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod oracle;

pub use fixtures::{corridor_grid, open_grid, random_grid, walled_grid, DEFAULT_REGION_SIZE};
pub use oracle::{is_connected_chain, reference_cost};
