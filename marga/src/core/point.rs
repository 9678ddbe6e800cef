//! Grid coordinates and bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices).
///
/// Also used as a displacement between two cells; the zero displacement
/// means "stay where you are".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Origin, and the "no move" displacement.
    pub const ZERO: GridCoord = GridCoord { x: 0, y: 0 };

    /// Create a new grid coordinate
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (max of x and y distance) - used for 8-connected grids
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True if `other` is one of the 8 surrounding cells.
    #[inline]
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }

    /// Get the 4 cardinal neighbors (N, E, S, W)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y + 1), // North
            GridCoord::new(self.x + 1, self.y), // East
            GridCoord::new(self.x, self.y - 1), // South
            GridCoord::new(self.x - 1, self.y), // West
        ]
    }

    /// Get the 8 neighbors (cardinals first, then diagonals)
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x, self.y + 1),     // N
            GridCoord::new(self.x + 1, self.y),     // E
            GridCoord::new(self.x, self.y - 1),     // S
            GridCoord::new(self.x - 1, self.y),     // W
            GridCoord::new(self.x + 1, self.y + 1), // NE
            GridCoord::new(self.x + 1, self.y - 1), // SE
            GridCoord::new(self.x - 1, self.y - 1), // SW
            GridCoord::new(self.x - 1, self.y + 1), // NW
        ]
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive axis-aligned rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Lowest corner (inclusive)
    pub min: GridCoord,
    /// Highest corner (inclusive)
    pub max: GridCoord,
}

impl GridBounds {
    /// Create bounds from two corners, normalizing their order.
    pub fn new(a: GridCoord, b: GridCoord) -> Self {
        Self {
            min: GridCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: GridCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Bounds covering `width` x `height` cells starting at the origin.
    pub fn from_size(width: usize, height: usize) -> Self {
        Self {
            min: GridCoord::ZERO,
            max: GridCoord::new(width as i32 - 1, height as i32 - 1),
        }
    }

    /// Width in cells
    #[inline]
    pub fn width(&self) -> usize {
        (self.max.x - self.min.x + 1) as usize
    }

    /// Height in cells
    #[inline]
    pub fn height(&self) -> usize {
        (self.max.y - self.min.y + 1) as usize
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Check whether a coordinate lies inside (inclusive).
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= self.min.x && coord.x <= self.max.x && coord.y >= self.min.y && coord.y <= self.max.y
    }

    /// Iterate over every coordinate, row by row from `min.y`.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| GridCoord::new(x, y)))
    }
}
