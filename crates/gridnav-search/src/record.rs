//! Per-cell search bookkeeping.

use gridnav_core::Cell;

use crate::connection::Connection;

/// What the search knows about one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRecord {
    /// The cell this record describes.
    pub node: Cell,
    /// Best known incoming connection. `None` only for the begin cell.
    pub connection: Option<Connection>,
    /// Cost of the best known path from the begin cell.
    pub cost_so_far: f32,
    /// `cost_so_far` plus the heuristic estimate to the goal.
    pub estimated_total_cost: f32,
}

impl NodeRecord {
    /// Record for the begin cell: no connection, zero cost so far.
    pub fn seed(node: Cell, estimate: f32) -> Self {
        Self {
            node,
            connection: None,
            cost_so_far: 0.0,
            estimated_total_cost: estimate,
        }
    }

    /// Heuristic part of the total estimate.
    pub fn heuristic_delta(&self) -> f32 {
        self.estimated_total_cost - self.cost_so_far
    }
}
