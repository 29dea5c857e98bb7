//! Orientation transforms.
//!
//! Both transforms are pure and self-inverse. The move pipeline uses them to
//! turn every direction into a left move and back.

use crate::game::Board;

/// Matrix transpose: row `i` becomes column `i`.
#[must_use]
pub fn transpose(board: &Board) -> Board {
    let size = board.size();
    let cells = board.cells();
    let rows = (0..size).map(|col| (0..size).map(|row| cells[row * size + col]).collect());
    Board::from_row_vecs(size, rows)
}

/// Horizontal mirror: every row reversed.
#[must_use]
pub fn reverse(board: &Board) -> Board {
    let rows = board.rows().map(|row| row.iter().rev().copied().collect());
    Board::from_row_vecs(board.size(), rows)
}
