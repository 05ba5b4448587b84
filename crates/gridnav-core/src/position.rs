//! Grid positions and the eight compass directions between them.

use std::fmt;

/// An integer grid coordinate.
///
/// `x` grows to the east and `y` grows to the south, so
/// [`Direction::North`] is the offset `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Construct a position from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The direction of a one-step move from `self` to `other`.
    ///
    /// Returns `None` unless the two positions are distinct and adjacent
    /// (Chebyshev distance exactly 1).
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::from_offset(other.x - self.x, other.y - self.y)
    }

    /// Straight-line distance.
    pub fn euclidean(self, other: Position) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// L-inf distance: the number of 8-connected moves on an open grid.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (other.x - self.x).unsigned_abs();
        let dy = (other.y - self.y).unsigned_abs();
        dx.max(dy)
    }

    /// L1 distance: the number of 4-connected moves on an open grid.
    pub fn manhattan(self, other: Position) -> u32 {
        (other.x - self.x).unsigned_abs() + (other.y - self.y).unsigned_abs()
    }

    /// Octile distance: the cost of the cheapest 8-connected route on an
    /// open grid when cardinal moves cost 1 and diagonal moves cost √2.
    pub fn octile(self, other: Position) -> f32 {
        let dx = (other.x - self.x).unsigned_abs();
        let dy = (other.y - self.y).unsigned_abs();
        let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
        (hi - lo) as f32 + lo as f32 * std::f32::consts::SQRT_2
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions of a square grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(0, -1)`
    North,
    /// `(1, 0)`
    East,
    /// `(0, 1)`
    South,
    /// `(-1, 0)`
    West,
    /// `(1, -1)`
    NorthEast,
    /// `(1, 1)`
    SouthEast,
    /// `(-1, 1)`
    SouthWest,
    /// `(-1, -1)`
    NorthWest,
}

impl Direction {
    /// All directions, cardinals first: N, E, S, W, NE, SE, SW, NW.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// The four cardinal directions: N, E, S, W.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(dx, dy)` of a one-step move.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Inverse of [`offset`](Self::offset). `None` for `(0, 0)` and for
    /// anything further than one step.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == (dx, dy))
    }

    /// Whether this is one of the four diagonal directions.
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }

    /// The direction pointing back the way this one came.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// The two cardinal moves a diagonal move cuts between, or `None`
    /// for a cardinal direction.
    pub const fn cardinal_components(self) -> Option<(Direction, Direction)> {
        match self {
            Self::NorthEast => Some((Self::North, Self::East)),
            Self::SouthEast => Some((Self::South, Self::East)),
            Self::SouthWest => Some((Self::South, Self::West)),
            Self::NorthWest => Some((Self::North, Self::West)),
            _ => None,
        }
    }

    /// Length of a one-step move in this direction: 1 or √2.
    pub fn step_length(self) -> f32 {
        if self.is_diagonal() {
            std::f32::consts::SQRT_2
        } else {
            1.0
        }
    }
}
