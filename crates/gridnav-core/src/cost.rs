//! Per-request traversal penalties.

/// Extra cost added to a one-step move for each kind of obstruction on
/// that specific edge.
///
/// Penalties are added on top of the geometric step length, so a
/// connection's cost never drops below its base distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModifiers {
    /// Penalty for passing through a door. Default: 10.
    pub door: f32,
    /// Penalty for moving into a cell occupied by an entity. Default: 5.
    pub entity: f32,
}

impl CostModifiers {
    /// No penalties: every move costs its geometric length.
    pub const NONE: CostModifiers = CostModifiers {
        door: 0.0,
        entity: 0.0,
    };
}

impl Default for CostModifiers {
    fn default() -> Self {
        Self {
            door: 10.0,
            entity: 5.0,
        }
    }
}
