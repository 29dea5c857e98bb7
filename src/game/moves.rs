//! Directions and the move pipeline.
//!
//! Every direction is reduced to a left move: orient the board so the move
//! points left, run compact → merge → compact, then undo the orientation.
//!
//! | Move  | In                    | Out                   |
//! |-------|-----------------------|-----------------------|
//! | Left  | identity              | identity              |
//! | Right | reverse               | reverse               |
//! | Up    | transpose             | transpose             |
//! | Down  | reverse ∘ transpose   | transpose ∘ reverse   |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Board, compact, merge, reverse, transpose};

/// A direction to slide the tiles.
///
/// The discriminants are the environment action indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0,
    /// Toward the last row.
    Down = 1,
    /// Toward column 0.
    Left = 2,
    /// Toward the last column.
    Right = 3,
}

impl Direction {
    /// All directions in action-index order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Action index of this direction.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rotate/mirror the board so this direction points left.
    fn orient(self, board: &Board) -> Board {
        match self {
            Direction::Left => board.clone(),
            Direction::Right => reverse(board),
            Direction::Up => transpose(board),
            Direction::Down => reverse(&transpose(board)),
        }
    }

    /// Undo [`Direction::orient`].
    fn restore(self, board: Board) -> Board {
        match self {
            Direction::Left => board,
            Direction::Right => reverse(&board),
            Direction::Up => transpose(&board),
            Direction::Down => transpose(&reverse(&board)),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    fn try_from(action: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(usize::from(action))
            .copied()
            .ok_or(GameError::InvalidDirection(action))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Slide and merge the board in `direction`.
///
/// Returns the resulting board and whether anything moved. When nothing
/// moved the returned board equals the input and no tile should be spawned.
#[must_use]
pub fn shift(board: &Board, direction: Direction) -> (Board, bool) {
    let oriented = direction.orient(board);
    let (compacted, slid) = compact(&oriented);
    let (merged, combined) = merge(&compacted);
    let (settled, _) = compact(&merged);
    (direction.restore(settled), slid || combined)
}

impl Board {
    /// Method form of [`shift`].
    #[must_use]
    pub fn shift(&self, direction: Direction) -> (Board, bool) {
        shift(self, direction)
    }
}
