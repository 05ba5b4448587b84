//! Real traversal cost of a single step.

use gridnav_core::{Cell, Collision, CostModifiers, NavGrid};

/// Prices a one-step move between adjacent cells.
///
/// The returned cost must be at least the geometric step length and
/// strictly positive. [`Connection::new`](crate::Connection::new) clamps
/// anything lower.
pub trait EdgeCost: Send {
    /// Cost of moving from `begin` to the adjacent `end`.
    fn cost(&self, grid: &dyn NavGrid, begin: &Cell, end: &Cell) -> f32;
}

/// Step length plus door and entity penalties.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObstacleEdgeCost {
    modifiers: CostModifiers,
}

impl ObstacleEdgeCost {
    /// Price steps with the given penalties.
    pub fn new(modifiers: CostModifiers) -> Self {
        Self { modifiers }
    }

    /// The penalties in use.
    pub fn modifiers(&self) -> &CostModifiers {
        &self.modifiers
    }
}

impl EdgeCost for ObstacleEdgeCost {
    fn cost(&self, grid: &dyn NavGrid, begin: &Cell, end: &Cell) -> f32 {
        let base = begin.position.euclidean(end.position);
        match begin.position.direction_to(end.position) {
            Some(direction) => {
                base + obstacle_penalty(grid.collision(begin, direction), &self.modifiers)
            }
            None => base,
        }
    }
}

/// Penalty for a step with the given collision. Negative modifiers
/// count as zero.
pub fn obstacle_penalty(collision: Collision, modifiers: &CostModifiers) -> f32 {
    let mut penalty = 0.0;
    if collision.door {
        penalty += modifiers.door.max(0.0);
    }
    if collision.entity {
        penalty += modifiers.entity.max(0.0);
    }
    penalty
}
