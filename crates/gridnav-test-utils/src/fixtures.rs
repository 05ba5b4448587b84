//! Tile grid fixtures.

use gridnav_core::{Direction, Position};
use gridnav_space::TileGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Region size used by every fixture.
pub const DEFAULT_REGION_SIZE: u32 = 8;

/// Fully walkable `width × height` grid.
pub fn open_grid(width: u32, height: u32) -> TileGrid {
    TileGrid::new(width, height, DEFAULT_REGION_SIZE).expect("fixture dimensions are valid")
}

/// Open grid with walls at `walls`.
pub fn walled_grid(width: u32, height: u32, walls: &[(i32, i32)]) -> TileGrid {
    let mut grid = open_grid(width, height);
    for &(x, y) in walls {
        grid.set_wall(Position::new(x, y), true)
            .expect("wall inside grid");
    }
    grid
}

/// Single-row corridor of `length` tiles with a door on the east edge of
/// each `doors` x coordinate.
pub fn corridor_grid(length: u32, doors: &[i32]) -> TileGrid {
    let mut grid = open_grid(length, 1);
    for &x in doors {
        grid.set_door(Position::new(x, 0), Direction::East, true)
            .expect("door inside corridor");
    }
    grid
}

/// Reproducible random grid.
///
/// Each tile except `(0, 0)` becomes a wall with probability
/// `wall_density`. Up to `door_count` doors are scattered on random
/// cardinal edges, and entities occupy about a tenth of the walkable
/// tiles.
pub fn random_grid(seed: u64, width: u32, height: u32, wall_density: f64, door_count: usize) -> TileGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = open_grid(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if (x, y) == (0, 0) {
                continue;
            }
            let p = Position::new(x, y);
            if rng.random_bool(wall_density) {
                grid.set_wall(p, true).expect("tile inside grid");
            } else if rng.random_bool(0.1) {
                grid.set_entity(p, true).expect("tile inside grid");
            }
        }
    }
    for _ in 0..door_count {
        let p = Position::new(
            rng.random_range(0..width as i32),
            rng.random_range(0..height as i32),
        );
        let direction = Direction::CARDINAL[rng.random_range(0..4)];
        if grid.contains(p.step(direction)) {
            grid.set_door(p, direction, true).expect("edge inside grid");
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_grid_is_reproducible() {
        let a = random_grid(7, 12, 9, 0.3, 6);
        let b = random_grid(7, 12, 9, 0.3, 6);
        for y in 0..9 {
            for x in 0..12 {
                let p = Position::new(x, y);
                assert_eq!(a.is_walkable(p), b.is_walkable(p));
                assert_eq!(a.has_entity(p), b.has_entity(p));
            }
        }
        assert_eq!(a.door_count(), b.door_count());
        assert!(a.is_walkable(Position::new(0, 0)));
    }

    #[test]
    fn corridor_places_doors() {
        let grid = corridor_grid(5, &[1, 3]);
        assert_eq!(grid.door_count(), 2);
        assert!(grid.has_door(Position::new(2, 0), Direction::West));
    }
}
