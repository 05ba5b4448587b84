//! Bounded square tile grid with walls, doors, entities, and regions.

use std::sync::atomic::{AtomicU8, Ordering};

use gridnav_core::{
    Cell, CellId, Collision, DiagonalPolicy, Direction, NavGrid, NeighborEntry, NeighborQuery,
    Neighbors, Position, RegionId, SpawnState,
};
use indexmap::IndexSet;

use crate::error::GridError;
use crate::grid2d;

/// A bounded 8-connected tile grid.
///
/// Each tile is either walkable or a wall. Doors sit on the edge between
/// two cardinally adjacent tiles and are stored symmetrically. Entities
/// occupy tiles. Tiles are grouped into square regions of
/// `region_size × region_size` tiles, each with its own [`SpawnState`].
///
/// Terrain (walls, doors, entities) is edited through `&mut self` and is
/// read-only while the grid is shared with searches. Spawn states are
/// atomics and may be changed through `&self` at any time; a search
/// observes whatever state a region is in when it expands a neighbour.
#[derive(Debug)]
pub struct TileGrid {
    width: u32,
    height: u32,
    region_size: u32,
    regions_x: u32,
    walls: Vec<bool>,
    entities: Vec<bool>,
    doors: IndexSet<(CellId, Direction)>,
    spawn_states: Vec<AtomicU8>,
}

impl TileGrid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Maximum cell count: every tile needs a distinct `u32` [`CellId`].
    pub const MAX_CELLS: u64 = u32::MAX as u64;

    /// Create an open grid of `width × height` walkable tiles with every
    /// region spawned.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0,
    /// `Err(GridError::DimensionTooLarge)` if either exceeds `i32::MAX`,
    /// `Err(GridError::TooManyCells)` if `width × height` exceeds
    /// [`MAX_CELLS`](Self::MAX_CELLS), or
    /// `Err(GridError::InvalidRegionSize)` if `region_size` is 0.
    pub fn new(width: u32, height: u32, region_size: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        let cells = u64::from(width) * u64::from(height);
        if cells > Self::MAX_CELLS {
            return Err(GridError::TooManyCells {
                cells,
                max: Self::MAX_CELLS,
            });
        }
        if region_size == 0 {
            return Err(GridError::InvalidRegionSize);
        }
        let cells = cells as usize;
        let regions_x = grid2d::blocks(width, region_size);
        let regions_y = grid2d::blocks(height, region_size);
        let region_count = (regions_x as usize) * (regions_y as usize);
        Ok(Self {
            width,
            height,
            region_size,
            regions_x,
            walls: vec![false; cells],
            entities: vec![false; cells],
            doors: IndexSet::new(),
            spawn_states: (0..region_count)
                .map(|_| AtomicU8::new(SpawnState::Spawned.as_raw()))
                .collect(),
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Side length of a region, in tiles.
    pub fn region_size(&self) -> u32 {
        self.region_size
    }

    /// Total number of tiles.
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    /// Total number of regions.
    pub fn region_count(&self) -> usize {
        self.spawn_states.len()
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        grid2d::row_major_index(position, self.width, self.height).is_some()
    }

    /// The region owning `position`, or `None` if out of bounds.
    pub fn region_of(&self, position: Position) -> Option<RegionId> {
        self.index(position)?;
        let rx = position.x as u32 / self.region_size;
        let ry = position.y as u32 / self.region_size;
        Some(RegionId(ry * self.regions_x + rx))
    }

    /// Whether `position` is in bounds and not a wall.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| !self.walls[i])
    }

    /// Mark or clear a wall.
    pub fn set_wall(&mut self, position: Position, wall: bool) -> Result<(), GridError> {
        let i = grid2d::check_2d_bounds(position, self.width, self.height)?;
        self.walls[i] = wall;
        Ok(())
    }

    /// Mark or clear an entity occupying a tile.
    pub fn set_entity(&mut self, position: Position, occupied: bool) -> Result<(), GridError> {
        let i = grid2d::check_2d_bounds(position, self.width, self.height)?;
        self.entities[i] = occupied;
        Ok(())
    }

    /// Whether an entity occupies `position`.
    pub fn has_entity(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.entities[i])
    }

    /// Place or remove a door on the cardinal edge leaving `position`
    /// in `direction`. The door is visible from both sides.
    pub fn set_door(
        &mut self,
        position: Position,
        direction: Direction,
        door: bool,
    ) -> Result<(), GridError> {
        if direction.is_diagonal() {
            return Err(GridError::DiagonalDoor {
                position,
                direction,
            });
        }
        let a = self.cell_id(position)?;
        let b = self.cell_id(position.step(direction))?;
        if door {
            self.doors.insert((a, direction));
            self.doors.insert((b, direction.opposite()));
        } else {
            self.doors.shift_remove(&(a, direction));
            self.doors.shift_remove(&(b, direction.opposite()));
        }
        Ok(())
    }

    /// Whether a door sits on the cardinal edge leaving `position` in
    /// `direction`.
    pub fn has_door(&self, position: Position, direction: Direction) -> bool {
        match self.index(position) {
            Some(i) => self.doors.contains(&(CellId(i as u32), direction)),
            None => false,
        }
    }

    /// Number of door edges (each counted once).
    pub fn door_count(&self) -> usize {
        self.doors.len() / 2
    }

    /// Change a region's spawn state. Safe to call while searches run.
    pub fn set_spawn_state(&self, region: RegionId, state: SpawnState) -> Result<(), GridError> {
        let slot = self
            .spawn_states
            .get(region.0 as usize)
            .ok_or(GridError::UnknownRegion { region })?;
        slot.store(state.as_raw(), Ordering::Release);
        Ok(())
    }

    /// Set every region to `state`.
    pub fn set_all_spawn_states(&self, state: SpawnState) {
        for slot in &self.spawn_states {
            slot.store(state.as_raw(), Ordering::Release);
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        grid2d::row_major_index(position, self.width, self.height)
    }

    fn cell_id(&self, position: Position) -> Result<CellId, GridError> {
        grid2d::check_2d_bounds(position, self.width, self.height).map(|i| CellId(i as u32))
    }

    fn cell_at(&self, index: usize) -> Cell {
        let position = grid2d::position_of(index, self.width);
        let rx = position.x as u32 / self.region_size;
        let ry = position.y as u32 / self.region_size;
        Cell::new(
            CellId(index as u32),
            position,
            RegionId(ry * self.regions_x + rx),
        )
    }

    /// A diagonal step is strict-passable when both cardinal tiles it
    /// cuts between are walkable.
    fn corners_walkable(&self, origin: Position, direction: Direction) -> bool {
        match direction.cardinal_components() {
            Some((a, b)) => self.is_walkable(origin.step(a)) && self.is_walkable(origin.step(b)),
            None => true,
        }
    }

    /// Whether any of the four edges meeting at the corner a diagonal
    /// step crosses carries a door.
    fn corner_has_door(&self, origin: Position, direction: Direction) -> bool {
        let Some((a, b)) = direction.cardinal_components() else {
            return false;
        };
        self.has_door(origin, a)
            || self.has_door(origin, b)
            || self.has_door(origin.step(a), b)
            || self.has_door(origin.step(b), a)
    }
}

impl NavGrid for TileGrid {
    fn try_get_cell(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|i| self.cell_at(i))
    }

    fn neighbors(&self, cell: &Cell, query: &NeighborQuery) -> Neighbors {
        let directions: &[Direction] = match query.diagonals {
            DiagonalPolicy::Strict => &Direction::ALL,
            DiagonalPolicy::Never => &Direction::CARDINAL,
        };
        let mut out = Neighbors::default();
        // Nothing leaves a wall.
        let exits = self.is_walkable(cell.position);
        for &direction in directions {
            let target = cell.position.step(direction);
            let Some(i) = self.index(target) else {
                continue;
            };
            let collision = self.collision(cell, direction);
            let accessible = exits
                && !self.walls[i]
                && query.filter_for(direction).admits(collision)
                && self.corners_walkable(cell.position, direction);
            out.push(NeighborEntry {
                cell: self.cell_at(i),
                direction,
                accessible,
                collision,
            });
        }
        out
    }

    fn collision(&self, cell: &Cell, direction: Direction) -> Collision {
        let target = cell.position.step(direction);
        if !self.contains(target) {
            return Collision::NONE;
        }
        let door = if direction.is_diagonal() {
            self.corner_has_door(cell.position, direction)
        } else {
            self.has_door(cell.position, direction)
        };
        Collision {
            door,
            entity: self.has_entity(target),
        }
    }

    fn spawn_state(&self, region: RegionId) -> Option<SpawnState> {
        let raw = self.spawn_states.get(region.0 as usize)?.load(Ordering::Acquire);
        SpawnState::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn cell(grid: &TileGrid, x: i32, y: i32) -> Cell {
        grid.try_get_cell(p(x, y)).unwrap()
    }

    fn accessible(grid: &TileGrid, from: Position, to: Position) -> bool {
        let c = grid.try_get_cell(from).unwrap();
        grid.neighbors(&c, &NeighborQuery::default())
            .entries
            .iter()
            .any(|e| e.cell.position == to && e.accessible)
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior() {
        let g = TileGrid::new(5, 5, 5).unwrap();
        let n = g.neighbors(&cell(&g, 2, 2), &NeighborQuery::default());
        assert_eq!(n.len(), 8);
        assert_eq!(n.accessible_count, 8);
    }

    #[test]
    fn neighbours_corner() {
        let g = TileGrid::new(5, 5, 5).unwrap();
        let n = g.neighbors(&cell(&g, 0, 0), &NeighborQuery::default());
        assert_eq!(n.len(), 3);
        let positions: Vec<Position> = n.entries.iter().map(|e| e.cell.position).collect();
        assert!(positions.contains(&p(1, 0)));
        assert!(positions.contains(&p(0, 1)));
        assert!(positions.contains(&p(1, 1)));
    }

    #[test]
    fn neighbours_edge() {
        let g = TileGrid::new(5, 5, 5).unwrap();
        let n = g.neighbors(&cell(&g, 2, 0), &NeighborQuery::default());
        assert_eq!(n.len(), 5);
    }

    #[test]
    fn never_policy_lists_cardinals_only() {
        let g = TileGrid::new(5, 5, 5).unwrap();
        let q = NeighborQuery::navigation(DiagonalPolicy::Never);
        let n = g.neighbors(&cell(&g, 2, 2), &q);
        assert_eq!(n.len(), 4);
        assert!(n.entries.iter().all(|e| !e.direction.is_diagonal()));
    }

    #[test]
    fn cardinals_are_listed_first() {
        let g = TileGrid::new(3, 3, 3).unwrap();
        let n = g.neighbors(&cell(&g, 1, 1), &NeighborQuery::default());
        let dirs: Vec<Direction> = n.entries.iter().map(|e| e.direction).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
    }

    // ── Walls, doors, entities ──────────────────────────────────

    #[test]
    fn walls_are_reported_inaccessible() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_wall(p(1, 0), true).unwrap();
        let n = g.neighbors(&cell(&g, 1, 1), &NeighborQuery::default());
        let north = n.entries.iter().find(|e| e.direction == Direction::North).unwrap();
        assert!(!north.accessible);
        assert_eq!(n.len(), 8);
    }

    #[test]
    fn wall_tiles_have_no_exits() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_wall(p(1, 1), true).unwrap();
        let n = g.neighbors(&cell(&g, 1, 1), &NeighborQuery::default());
        assert_eq!(n.len(), 8);
        assert_eq!(n.accessible_count, 0);
    }

    #[test]
    fn strict_diagonal_needs_both_corners() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_wall(p(1, 0), true).unwrap();
        // NE and NW of (1,1) both cut past the wall at (1,0).
        assert!(!accessible(&g, p(1, 1), p(2, 0)));
        assert!(!accessible(&g, p(1, 1), p(0, 0)));
        assert!(accessible(&g, p(1, 1), p(2, 2)));
    }

    #[test]
    fn doors_are_symmetric_and_reported() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_door(p(0, 0), Direction::East, true).unwrap();
        assert!(g.has_door(p(0, 0), Direction::East));
        assert!(g.has_door(p(1, 0), Direction::West));
        assert_eq!(g.door_count(), 1);

        let c = g.collision(&cell(&g, 1, 0), Direction::West);
        assert!(c.door);
        assert!(!c.entity);
        // Cardinal doors stay accessible under the navigation query.
        assert!(accessible(&g, p(0, 0), p(1, 0)));

        g.set_door(p(1, 0), Direction::West, false).unwrap();
        assert!(!g.has_door(p(0, 0), Direction::East));
        assert_eq!(g.door_count(), 0);
    }

    #[test]
    fn diagonal_past_a_door_is_excluded() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_door(p(1, 1), Direction::North, true).unwrap();
        assert!(!accessible(&g, p(1, 1), p(2, 0)));
        // The far edges of the corner count too.
        assert!(!accessible(&g, p(2, 1), p(1, 0)));
        assert!(accessible(&g, p(1, 1), p(2, 2)));
    }

    #[test]
    fn diagonal_door_rejected() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        assert!(matches!(
            g.set_door(p(0, 0), Direction::SouthEast, true),
            Err(GridError::DiagonalDoor { .. })
        ));
        assert!(matches!(
            g.set_door(p(0, 0), Direction::North, true),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn entity_collision_is_on_destination() {
        let mut g = TileGrid::new(3, 3, 3).unwrap();
        g.set_entity(p(1, 0), true).unwrap();
        assert!(g.collision(&cell(&g, 0, 0), Direction::East).entity);
        assert!(!g.collision(&cell(&g, 1, 0), Direction::West).entity);
        assert!(accessible(&g, p(0, 0), p(1, 0)));
        // Diagonal moves into an occupied tile are excluded.
        assert!(!accessible(&g, p(0, 1), p(1, 0)));
    }

    #[test]
    fn collision_off_grid_is_clear() {
        let g = TileGrid::new(2, 2, 2).unwrap();
        assert!(g.collision(&cell(&g, 0, 0), Direction::North).is_clear());
    }

    // ── Regions ─────────────────────────────────────────────────

    #[test]
    fn region_assignment_is_blockwise() {
        let g = TileGrid::new(10, 6, 4).unwrap();
        assert_eq!(g.region_count(), 3 * 2);
        assert_eq!(g.region_of(p(0, 0)), Some(RegionId(0)));
        assert_eq!(g.region_of(p(4, 0)), Some(RegionId(1)));
        assert_eq!(g.region_of(p(9, 5)), Some(RegionId(5)));
        assert_eq!(g.region_of(p(10, 0)), None);
        assert_eq!(cell(&g, 5, 4).region, RegionId(4));
    }

    #[test]
    fn spawn_state_changes_through_shared_reference() {
        let g = Arc::new(TileGrid::new(8, 8, 4).unwrap());
        assert_eq!(g.spawn_state(RegionId(3)), Some(SpawnState::Spawned));

        let writer = Arc::clone(&g);
        thread::spawn(move || {
            writer
                .set_spawn_state(RegionId(3), SpawnState::Despawning)
                .unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(g.spawn_state(RegionId(3)), Some(SpawnState::Despawning));
        assert_eq!(g.spawn_state(RegionId(99)), None);
        assert!(matches!(
            g.set_spawn_state(RegionId(99), SpawnState::Spawned),
            Err(GridError::UnknownRegion { .. })
        ));
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_rejects_bad_dimensions() {
        assert!(matches!(TileGrid::new(0, 5, 1), Err(GridError::EmptyGrid)));
        assert!(matches!(TileGrid::new(5, 5, 0), Err(GridError::InvalidRegionSize)));
        let big = i32::MAX as u32 + 1;
        assert!(matches!(
            TileGrid::new(big, 5, 1),
            Err(GridError::DimensionTooLarge { name: "width", .. })
        ));
    }

    #[test]
    fn new_rejects_more_cells_than_ids() {
        // 65536² = 2³² tiles: one more than a u32 id can tell apart.
        assert_eq!(
            TileGrid::new(65_536, 65_536, 8).unwrap_err(),
            GridError::TooManyCells {
                cells: 1 << 32,
                max: u32::MAX as u64,
            }
        );
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = TileGrid::new(1, 1, 1).unwrap();
        assert!(g.neighbors(&cell(&g, 0, 0), &NeighborQuery::default()).is_empty());
        assert!(g.try_get_cell(p(1, 0)).is_none());
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn accessibility_is_symmetric_between_walkable_tiles(
            w in 2u32..8,
            h in 2u32..8,
            walls in proptest::collection::vec((0i32..8, 0i32..8), 0..12),
            doors in proptest::collection::vec((0i32..8, 0i32..8, 0usize..4), 0..6),
        ) {
            let mut g = TileGrid::new(w, h, 3).unwrap();
            for (x, y) in walls {
                let _ = g.set_wall(p(x, y), true);
            }
            for (x, y, d) in doors {
                let _ = g.set_door(p(x, y), Direction::CARDINAL[d], true);
            }
            let q = NeighborQuery::default();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    let c = cell(&g, x, y);
                    if !g.is_walkable(c.position) {
                        continue;
                    }
                    for e in g.neighbors(&c, &q).entries {
                        if !g.is_walkable(e.cell.position) {
                            prop_assert!(!e.accessible);
                            continue;
                        }
                        let back = g
                            .neighbors(&e.cell, &q)
                            .entries
                            .into_iter()
                            .find(|b| b.cell == c)
                            .unwrap();
                        prop_assert_eq!(e.accessible, back.accessible);
                        prop_assert_eq!(e.collision.door, back.collision.door);
                    }
                }
            }
        }
    }
}
