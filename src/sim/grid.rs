//! Grid coordinates and movement directions
//!
//! All simulation state is expressed in whole cells. Pixel/screen conversion
//! belongs to whatever draws the frame.

use serde::{Deserialize, Serialize};

/// One grid unit, addressed by column and row.
///
/// In-grid cells are always non-negative. Coordinates are signed so that a
/// head stepping off the top or left edge is still representable; such a
/// cell is simply out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    /// Level origin, also used as the food sentinel when no cell is free
    pub const ORIGIN: Cell = Cell { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Whether the cell lies inside `[0, width) x [0, height)`
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.col >= 0 && self.row >= 0 && (self.col as u32) < width && (self.row as u32) < height
    }
}

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta in cell space (rows grow downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}
