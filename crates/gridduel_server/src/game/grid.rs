//! # Board Occupancy
//!
//! A fixed 9×9 array of cell markers. Power-ups live beside the grid, not in
//! it: a marker always means "a unit stands here".

use gridduel_shared::{Coord, Role, GRID_SIZE};

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Cell occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Role>; CELL_COUNT],
}

impl Grid {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Marker at a cell. Off-board coordinates read as empty.
    #[must_use]
    pub fn get(&self, at: Coord) -> Option<Role> {
        if at.in_bounds() {
            self.cells[at.index()]
        } else {
            None
        }
    }

    /// Returns true if an in-bounds cell holds no marker.
    #[must_use]
    pub fn is_empty(&self, at: Coord) -> bool {
        at.in_bounds() && self.cells[at.index()].is_none()
    }

    /// Places a marker. Off-board coordinates are ignored.
    pub fn set(&mut self, at: Coord, role: Role) {
        if at.in_bounds() {
            self.cells[at.index()] = Some(role);
        }
    }

    /// Clears a cell.
    pub fn clear(&mut self, at: Coord) {
        if at.in_bounds() {
            self.cells[at.index()] = None;
        }
    }

    /// Clears the whole board.
    pub fn clear_all(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Number of marked cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major copy for snapshots, `rows[y][x]`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<Role>>> {
        self.cells.chunks(GRID_SIZE).map(<[_]>::to_vec).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut grid = Grid::new();
        let at = Coord::new(2, 5);
        assert!(grid.is_empty(at));

        grid.set(at, Role::PlayerA);
        assert_eq!(grid.get(at), Some(Role::PlayerA));
        assert_eq!(grid.occupied(), 1);

        grid.clear(at);
        assert!(grid.is_empty(at));
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_off_board_is_never_empty() {
        let grid = Grid::new();
        assert!(!grid.is_empty(Coord::new(-1, 0)));
        assert!(!grid.is_empty(Coord::new(0, 9)));
        assert_eq!(grid.get(Coord::new(9, 9)), None);
    }

    #[test]
    fn test_rows_layout() {
        let mut grid = Grid::new();
        grid.set(Coord::new(3, 1), Role::PlayerB);
        let rows = grid.rows();
        assert_eq!(rows.len(), GRID_SIZE);
        assert_eq!(rows[1][3], Some(Role::PlayerB));
        assert_eq!(rows[3][1], None);
    }
}
