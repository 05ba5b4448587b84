//! Shared helpers for row-major 2D grids.

use crate::error::GridError;
use gridnav_core::Position;

/// Check that a position is in bounds and return its row-major index.
pub(crate) fn check_2d_bounds(
    position: Position,
    width: u32,
    height: u32,
) -> Result<usize, GridError> {
    row_major_index(position, width, height).ok_or_else(|| GridError::OutOfBounds {
        position,
        bounds: format!("[0, {width}) x [0, {height})"),
    })
}

/// Row-major index of an in-bounds position, `None` otherwise.
pub(crate) fn row_major_index(position: Position, width: u32, height: u32) -> Option<usize> {
    let Position { x, y } = position;
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return None;
    }
    Some((y as usize) * (width as usize) + (x as usize))
}

/// Inverse of [`row_major_index`].
pub(crate) fn position_of(index: usize, width: u32) -> Position {
    let w = width as usize;
    Position::new((index % w) as i32, (index / w) as i32)
}

/// Number of blocks of `block` cells needed to cover `len` cells.
pub(crate) fn blocks(len: u32, block: u32) -> u32 {
    len.div_ceil(block)
}
