//! Cells, regions, and the region spawn lifecycle.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::position::Position;

/// Identifies a cell within a grid.
///
/// Assigned by the grid; two cells are the same cell iff their ids are
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies the region (chunk) that owns a block of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A resolved grid cell.
///
/// Cells are cheap handles handed out by a [`NavGrid`](crate::NavGrid).
/// Equality and hashing use [`CellId`] only: the position and region
/// are carried along for convenience, not identity.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    /// Identity of the cell within its grid.
    pub id: CellId,
    /// Where the cell sits.
    pub position: Position,
    /// The region whose spawn state gates traversal of this cell.
    pub region: RegionId,
}

impl Cell {
    /// Construct a cell handle.
    pub const fn new(id: CellId, position: Position, region: RegionId) -> Self {
        Self {
            id,
            position,
            region,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} at {}", self.id, self.position)
    }
}

/// Lifecycle of a region as driven by the host simulation.
///
/// Only [`Spawned`](SpawnState::Spawned) regions are traversable. The
/// other states mean the region is temporarily absent, not permanently
/// blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnState {
    /// The region is being loaded.
    Spawning,
    /// The region is loaded and stable.
    Spawned,
    /// The region is being unloaded.
    Despawning,
    /// The region is unloaded.
    Despawned,
}

impl SpawnState {
    /// Compact encoding for atomic storage.
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Spawning => 0,
            Self::Spawned => 1,
            Self::Despawning => 2,
            Self::Despawned => 3,
        }
    }

    /// Decode [`as_raw`](Self::as_raw). `None` for unknown codes.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Spawning),
            1 => Some(Self::Spawned),
            2 => Some(Self::Despawning),
            3 => Some(Self::Despawned),
            _ => None,
        }
    }

    /// Whether cells in a region in this state may be traversed.
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Spawned)
    }
}

impl fmt::Display for SpawnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawning => write!(f, "spawning"),
            Self::Spawned => write!(f, "spawned"),
            Self::Despawning => write!(f, "despawning"),
            Self::Despawned => write!(f, "despawned"),
        }
    }
}
