//! Error types for the 2048 core.

use std::fmt;

use crate::game::Cell;

/// Errors surfaced by board construction, spawning, and the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Action index outside the four recognized directions.
    InvalidDirection(u8),
    /// Spawn requested on a board with no empty cell.
    NoEmptyCell,
    /// Board size must be at least 1, and its square must fit in `usize`.
    InvalidSize(usize),
    /// A cell holds a value that is neither 0 nor a power of two.
    InvalidTile {
        /// Offending cell.
        cell: Cell,
        /// Value found there.
        value: u32,
    },
    /// A row has a different length than the number of rows.
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Expected length (number of rows).
        expected: usize,
    },
    /// A tile source picked an index past the list of empty cells.
    InvalidCellChoice {
        /// Index returned by the source.
        index: usize,
        /// Number of empty cells it was offered.
        empty_cells: usize,
    },
    /// The tiles on the board add up to more than a `u32` can hold.
    TileSumOverflow,
    /// `step` was called before the first `reset`.
    EpisodeNotStarted,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDirection(action) => {
                write!(f, "invalid direction: action {action} (expected 0..4)")
            }
            GameError::NoEmptyCell => write!(f, "no empty cell left to spawn a tile"),
            GameError::InvalidSize(size) => write!(f, "invalid board size: {size}"),
            GameError::InvalidTile { cell, value } => {
                write!(f, "invalid tile {value} at {cell}")
            }
            GameError::NotSquare { row, len, expected } => {
                write!(f, "row {row} has {len} cells, expected {expected}")
            }
            GameError::InvalidCellChoice { index, empty_cells } => {
                write!(f, "cell choice {index} out of range (0..{empty_cells})")
            }
            GameError::TileSumOverflow => write!(f, "tile sum does not fit in u32"),
            GameError::EpisodeNotStarted => write!(f, "episode not started: call reset first"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for fallible game operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GameError::InvalidDirection(7).to_string(),
            "invalid direction: action 7 (expected 0..4)"
        );
        assert_eq!(GameError::InvalidSize(0).to_string(), "invalid board size: 0");
        let err = GameError::InvalidTile {
            cell: Cell::new(1, 2),
            value: 3,
        };
        assert_eq!(err.to_string(), "invalid tile 3 at (1, 2)");
        let err = GameError::InvalidCellChoice {
            index: 9,
            empty_cells: 3,
        };
        assert_eq!(err.to_string(), "cell choice 9 out of range (0..3)");
    }
}
