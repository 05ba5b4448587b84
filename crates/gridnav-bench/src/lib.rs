//! Benchmark profiles for gridnav.
//!
//! Provides pre-built grids and request batches used by the criterion
//! benchmarks in `benches/`.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridnav_core::{Cell, NavGrid, Position};
use gridnav_engine::Request;
use gridnav_space::TileGrid;
use gridnav_test_utils::{open_grid, random_grid};

/// Wall density of [`maze_profile`].
pub const MAZE_WALL_DENSITY: f64 = 0.25;

/// Door count of [`maze_profile`], per 1000 tiles.
pub const MAZE_DOORS_PER_1000: usize = 20;

/// Open `side × side` grid with no obstacles.
pub fn open_profile(side: u32) -> TileGrid {
    open_grid(side, side)
}

/// Reproducible `side × side` maze with scattered walls, doors and
/// entities. Both corners used by [`corner_cells`] are kept walkable.
pub fn maze_profile(seed: u64, side: u32) -> TileGrid {
    let tiles = (side as usize) * (side as usize);
    let mut grid = random_grid(
        seed,
        side,
        side,
        MAZE_WALL_DENSITY,
        tiles * MAZE_DOORS_PER_1000 / 1000,
    );
    let far = Position::new(side as i32 - 1, side as i32 - 1);
    grid.set_wall(far, false).expect("corner inside grid");
    grid.set_entity(far, false).expect("corner inside grid");
    grid
}

/// The top-left and bottom-right cells of a square grid.
pub fn corner_cells(grid: &TileGrid) -> (Cell, Cell) {
    let far = Position::new(grid.width() as i32 - 1, grid.height() as i32 - 1);
    let begin = grid.try_get_cell(Position::new(0, 0)).expect("grid is non-empty");
    let end = grid.try_get_cell(far).expect("grid is non-empty");
    (begin, end)
}

/// `n` requests with deterministic endpoints spread over a `side × side`
/// grid.
///
/// Endpoints are derived from a simple hash of the seed and may land on
/// walls; those requests complete with an exception, which is part of
/// the measured workload.
pub fn request_batch(side: u32, n: usize, seed: u64) -> Vec<Request> {
    let side = side as u64;
    let cells = side * side;
    let pick = |k: u64| {
        let flat = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(k.wrapping_mul(1442695040888963407))
            % cells;
        ((flat % side) as i32, (flat / side) as i32)
    };
    (0..n as u64)
        .map(|i| Request::euclidean(pick(2 * i), pick(2 * i + 1)))
        .collect()
}
