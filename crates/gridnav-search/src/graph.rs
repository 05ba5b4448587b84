//! Outgoing connections of a cell, built on demand.

use smallvec::SmallVec;

use gridnav_core::{Cell, NavError, NavGrid, NeighborEntry, NeighborQuery, SpawnState};

use crate::connection::Connection;
use crate::edge_cost::EdgeCost;

/// Connections out of a single cell. Never more than eight.
pub type Connections = SmallVec<[Connection; 8]>;

/// Lazily expands grid cells into costed [`Connection`]s.
///
/// A neighbour yields a connection when the grid reports it accessible
/// under the query's filters and its region is currently
/// [`SpawnState::Spawned`]. Regions that are spawning, despawning, or
/// despawned are skipped; a region with no recognised state is a grid
/// contract violation and fails the expansion.
pub struct ConnectionGraph<'g> {
    grid: &'g dyn NavGrid,
    query: NeighborQuery,
    edge_cost: Box<dyn EdgeCost + 'g>,
}

impl<'g> ConnectionGraph<'g> {
    /// Build a graph over `grid`.
    pub fn new(grid: &'g dyn NavGrid, query: NeighborQuery, edge_cost: Box<dyn EdgeCost + 'g>) -> Self {
        Self {
            grid,
            query,
            edge_cost,
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'g dyn NavGrid {
        self.grid
    }

    /// The neighbour query used for expansion.
    pub fn query(&self) -> &NeighborQuery {
        &self.query
    }

    /// All traversable connections leaving `cell`.
    pub fn connections(&self, cell: &Cell) -> Result<Connections, NavError> {
        let neighbors = self.grid.neighbors(cell, &self.query);
        let mut remaining = neighbors.accessible_count;
        let mut out = Connections::new();
        for entry in &neighbors.entries {
            if remaining == 0 {
                break;
            }
            if !entry.accessible {
                continue;
            }
            remaining -= 1;
            if !self.is_spawned(entry)? {
                continue;
            }
            let cost = self.edge_cost.cost(self.grid, cell, &entry.cell);
            out.push(Connection::new(*cell, entry.cell, entry.direction, cost)?);
        }
        Ok(out)
    }

    fn is_spawned(&self, entry: &NeighborEntry) -> Result<bool, NavError> {
        match self.grid.spawn_state(entry.cell.region) {
            Some(SpawnState::Spawned) => Ok(true),
            Some(SpawnState::Spawning | SpawnState::Despawning | SpawnState::Despawned) => {
                Ok(false)
            }
            None => Err(NavError::UnknownRegion {
                cell: entry.cell,
                region: entry.cell.region,
            }),
        }
    }
}
