//! Directed one-step edges between adjacent cells.

use std::fmt;

use gridnav_core::{Cell, Direction, NavError};

/// A directed, costed step from one cell to an adjacent one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    /// Origin cell.
    pub begin: Cell,
    /// Destination cell.
    pub end: Cell,
    /// Direction of travel from `begin` to `end`.
    pub direction: Direction,
    /// Traversal cost. Never below the step length.
    pub cost: f32,
}

impl Connection {
    /// Build a connection. Costs below the geometric step length are
    /// raised to it; a NaN cost is replaced by the step length.
    ///
    /// Returns `Err(NavError::SelfConnection)` if `begin` and `end` are
    /// the same cell.
    pub fn new(begin: Cell, end: Cell, direction: Direction, cost: f32) -> Result<Self, NavError> {
        if begin == end {
            return Err(NavError::SelfConnection { cell: begin });
        }
        Ok(Self {
            begin,
            end,
            direction,
            cost: cost.max(direction.step_length()),
        })
    }

    /// Unit vector pointing from `begin` towards `end`.
    pub fn normal(&self) -> (f32, f32) {
        let dx = (self.end.position.x - self.begin.position.x) as f32;
        let dy = (self.end.position.y - self.begin.position.y) as f32;
        let length = (dx * dx + dy * dy).sqrt();
        (dx / length, dy / length)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:.3})",
            self.begin.position, self.end.position, self.cost
        )
    }
}
