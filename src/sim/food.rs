//! Food placement
//!
//! Enumerates free cells once and samples from the list, so placement always
//! terminates even on a nearly full grid.

use rand::Rng;

use super::grid::Cell;
use super::snake::Snake;
use crate::level::LevelData;

/// Cells that are in the grid and not covered by an obstacle or the snake
pub fn free_cells(snake: &Snake, level: &LevelData) -> Vec<Cell> {
    level
        .cells()
        .filter(|&cell| !level.is_blocked(cell) && !snake.contains(cell))
        .collect()
}

/// Choose the next food cell.
///
/// A level with fixed food always gets that cell back. Otherwise a free cell
/// is drawn uniformly; with no free cell left the sentinel `Cell::ORIGIN` is
/// returned.
pub fn place<R: Rng>(snake: &Snake, level: &LevelData, rng: &mut R) -> Cell {
    if let Some(fixed) = level.fixed_food {
        return fixed;
    }

    let free = free_cells(snake, level);
    if free.is_empty() {
        log::debug!("No free cell for food, using sentinel");
        return Cell::ORIGIN;
    }
    free[rng.random_range(0..free.len())]
}
