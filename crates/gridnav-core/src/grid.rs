//! The grid contract consumed by path searches.
//!
//! Searches never own the world they navigate. They read it through
//! [`NavGrid`], which the host implements over whatever cell storage it
//! uses. The trait is deliberately narrow: resolve a coordinate, list a
//! cell's neighbours, ask what obstructs a single step, and report a
//! region's spawn state.

use smallvec::SmallVec;

use crate::cell::{Cell, RegionId, SpawnState};
use crate::position::{Direction, Position};

/// Whether diagonal moves are considered at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DiagonalPolicy {
    /// Diagonal moves are allowed only when both cardinal cells they cut
    /// between are walkable and no door sits on either flanking edge.
    #[default]
    Strict,
    /// Only the four cardinal moves are enumerated.
    Never,
}

/// Which blocked neighbours a query should still report as accessible.
///
/// A neighbour blocked only by a door or an entity is something a
/// search can pay to pass; including it lets the edge cost account for
/// the obstruction instead of hiding the neighbour altogether.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct NeighborFilter {
    /// Report door-blocked neighbours as accessible.
    pub include_blocked_by_doors: bool,
    /// Report entity-occupied neighbours as accessible.
    pub include_blocked_by_entities: bool,
}

impl NeighborFilter {
    /// Include neighbours blocked by doors and by entities.
    pub const INCLUDE_ALL: NeighborFilter = NeighborFilter {
        include_blocked_by_doors: true,
        include_blocked_by_entities: true,
    };

    /// Exclude every obstructed neighbour.
    pub const EXCLUDE_ALL: NeighborFilter = NeighborFilter {
        include_blocked_by_doors: false,
        include_blocked_by_entities: false,
    };

    /// Whether a neighbour with this collision passes the filter.
    pub fn admits(&self, collision: Collision) -> bool {
        (!collision.door || self.include_blocked_by_doors)
            && (!collision.entity || self.include_blocked_by_entities)
    }
}

/// Options for a neighbour query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborQuery {
    /// Diagonal adjacency policy.
    pub diagonals: DiagonalPolicy,
    /// Filter applied to cardinal neighbours.
    pub cardinal: NeighborFilter,
    /// Filter applied to diagonal neighbours.
    pub diagonal: NeighborFilter,
}

impl NeighborQuery {
    /// The configuration path searches use: diagonals as given, doors and
    /// entities on cardinal moves reported rather than excluded, and
    /// diagonal moves that would squeeze past an obstruction excluded.
    pub const fn navigation(diagonals: DiagonalPolicy) -> Self {
        Self {
            diagonals,
            cardinal: NeighborFilter::INCLUDE_ALL,
            diagonal: NeighborFilter::EXCLUDE_ALL,
        }
    }

    /// The filter that applies to a move in `direction`.
    pub fn filter_for(&self, direction: Direction) -> NeighborFilter {
        if direction.is_diagonal() {
            self.diagonal
        } else {
            self.cardinal
        }
    }
}

impl Default for NeighborQuery {
    fn default() -> Self {
        Self::navigation(DiagonalPolicy::Strict)
    }
}

/// What obstructs a single step between two adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Collision {
    /// A door sits on the edge being crossed.
    pub door: bool,
    /// The destination cell is occupied by an entity.
    pub entity: bool,
}

impl Collision {
    /// Nothing in the way.
    pub const NONE: Collision = Collision {
        door: false,
        entity: false,
    };

    /// Whether the step is unobstructed.
    pub fn is_clear(&self) -> bool {
        !self.door && !self.entity
    }
}

/// One slot of a neighbour query result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborEntry {
    /// The neighbouring cell.
    pub cell: Cell,
    /// Direction of the step from the queried cell to `cell`.
    pub direction: Direction,
    /// Whether the neighbour may be entered under the query options.
    pub accessible: bool,
    /// Obstructions on the step, reported even when accessible.
    pub collision: Collision,
}

/// Result of [`NavGrid::neighbors`].
///
/// `entries` may contain inaccessible neighbours; `accessible_count`
/// lets consumers stop scanning once every accessible entry has been
/// seen.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    /// Every in-bounds neighbour, accessible or not.
    pub entries: SmallVec<[NeighborEntry; 8]>,
    /// How many of `entries` are accessible.
    pub accessible_count: usize,
}

impl Neighbors {
    /// Append an entry, keeping `accessible_count` in sync.
    pub fn push(&mut self, entry: NeighborEntry) {
        if entry.accessible {
            self.accessible_count += 1;
        }
        self.entries.push(entry);
    }

    /// Number of entries, accessible or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the query returned no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read access to a navigable grid.
///
/// Implementations are shared across every in-flight search and read
/// concurrently from worker threads, so they must be `Send + Sync`.
/// Searches never mutate the grid.
pub trait NavGrid: Send + Sync + 'static {
    /// Resolve a coordinate to a cell, or `None` if no cell exists there.
    fn try_get_cell(&self, position: Position) -> Option<Cell>;

    /// Enumerate the geometric neighbours of `cell` under `query`.
    fn neighbors(&self, cell: &Cell, query: &NeighborQuery) -> Neighbors;

    /// Obstructions on the single step from `cell` in `direction`.
    ///
    /// Returns [`Collision::NONE`] if the step leaves the grid.
    fn collision(&self, cell: &Cell, direction: Direction) -> Collision;

    /// Current lifecycle state of a region, or `None` if the grid does
    /// not know the region.
    fn spawn_state(&self, region: RegionId) -> Option<SpawnState>;
}
