//! Reference Dijkstra over any [`NavGrid`].
//!
//! Uses the same step pricing as the navigation search (step length plus
//! door and entity penalties on the edge) but none of its code, so the
//! two can be compared.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use gridnav_core::{
    CellId, CostModifiers, DiagonalPolicy, NavGrid, NeighborQuery, Position, SpawnState,
};

#[derive(PartialEq)]
struct Frontier {
    cost: f32,
    id: CellId,
    position: Position,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest cost from `begin` to `end`, or `None` if unreachable or
/// either position is off the grid.
pub fn reference_cost(
    grid: &dyn NavGrid,
    begin: Position,
    end: Position,
    diagonals: DiagonalPolicy,
    modifiers: CostModifiers,
) -> Option<f32> {
    let start = grid.try_get_cell(begin)?;
    let goal = grid.try_get_cell(end)?;
    let query = NeighborQuery::navigation(diagonals);

    let mut best: HashMap<CellId, f32> = HashMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(start.id, 0.0);
    heap.push(Frontier {
        cost: 0.0,
        id: start.id,
        position: start.position,
    });

    while let Some(Frontier { cost, id, position }) = heap.pop() {
        if id == goal.id {
            return Some(cost);
        }
        if best.get(&id).is_some_and(|&b| b < cost) {
            continue;
        }
        let cell = grid.try_get_cell(position)?;
        for entry in grid.neighbors(&cell, &query).entries {
            if !entry.accessible || grid.spawn_state(entry.cell.region) != Some(SpawnState::Spawned) {
                continue;
            }
            let mut step = entry.direction.step_length();
            if entry.collision.door {
                step += modifiers.door.max(0.0);
            }
            if entry.collision.entity {
                step += modifiers.entity.max(0.0);
            }
            let next = cost + step;
            if best.get(&entry.cell.id).is_none_or(|&b| next < b) {
                best.insert(entry.cell.id, next);
                heap.push(Frontier {
                    cost: next,
                    id: entry.cell.id,
                    position: entry.cell.position,
                });
            }
        }
    }
    None
}

/// Whether `positions` is a walk of single steps over walkable tiles.
pub fn is_connected_chain(grid: &dyn NavGrid, positions: &[Position]) -> bool {
    positions.iter().all(|p| grid.try_get_cell(*p).is_some())
        && positions
            .windows(2)
            .all(|w| w[0].direction_to(w[1]).is_some())
}
