//! Board coordinates shared between client and server.
//!
//! Zero-indexed, `x` is the column and `y` the row. Components are signed so
//! that hostile input such as `{"x": -1}` deserializes and is then rejected as
//! out of bounds instead of failing to parse.

use serde::{Deserialize, Serialize};

use crate::constants::GRID_SIZE;

/// A cell on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if the coordinate lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < GRID_SIZE && (self.y as usize) < GRID_SIZE
    }

    /// Chebyshev distance, `max(|dx|, |dy|)`.
    #[must_use]
    pub const fn chebyshev(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy {
            dx
        } else {
            dy
        }
    }

    /// Row-major cell index. Only meaningful for in-bounds coordinates.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::new((index % GRID_SIZE) as i32, (index / GRID_SIZE) as i32)
    }
}
