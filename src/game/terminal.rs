//! Terminal-state detection.

use crate::game::Board;

/// Check whether no move can change the board.
///
/// True iff there is no empty cell and no two horizontally or vertically
/// adjacent cells hold equal values. Every cell is compared with its right
/// and lower neighbour, so each edge pair is checked exactly once, the last
/// row and last column included.
#[must_use]
pub fn is_terminal(board: &Board) -> bool {
    let size = board.size();
    let cells = board.cells();

    for row in 0..size {
        for col in 0..size {
            let value = cells[row * size + col];
            if value == 0 {
                return false;
            }
            if col + 1 < size && cells[row * size + col + 1] == value {
                return false;
            }
            if row + 1 < size && cells[(row + 1) * size + col] == value {
                return false;
            }
        }
    }

    true
}

impl Board {
    /// Method form of [`is_terminal`].
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        is_terminal(self)
    }
}
