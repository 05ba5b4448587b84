//! Error types for grid construction and editing.

use gridnav_core::{Direction, Position, RegionId};
use std::fmt;

/// Errors arising from grid construction or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A dimension exceeds what `i32` coordinates can address.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest accepted size.
        max: u32,
    },
    /// `width × height` exceeds the number of distinct cell ids.
    TooManyCells {
        /// The requested cell count.
        cells: u64,
        /// The largest accepted cell count.
        max: u64,
    },
    /// Region size must be at least 1.
    InvalidRegionSize,
    /// A position is outside the grid.
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// Doors can only sit on cardinal edges.
    DiagonalDoor {
        /// The position the door was placed from.
        position: Position,
        /// The rejected diagonal direction.
        direction: Direction,
    },
    /// No region with this id exists.
    UnknownRegion {
        /// The offending region id.
        region: RegionId,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::TooManyCells { cells, max } => {
                write!(f, "{cells} cells exceeds maximum {max}")
            }
            Self::InvalidRegionSize => write!(f, "region size must be at least 1"),
            Self::OutOfBounds { position, bounds } => {
                write!(f, "position {position} out of bounds: {bounds}")
            }
            Self::DiagonalDoor {
                position,
                direction,
            } => {
                write!(f, "door at {position} facing {direction:?} is not on a cardinal edge")
            }
            Self::UnknownRegion { region } => write!(f, "unknown region {region}"),
        }
    }
}

impl std::error::Error for GridError {}
