//! Game core for 2048.
//!
//! - Board with square grid of tiles
//! - Orientation transforms (transpose, reverse)
//! - Row compaction and merge
//! - Move pipeline built from the two above
//! - Tile spawning with injectable randomness
//! - Terminal-state detection

mod board;
mod geometry;
mod invariants;
mod line;
mod moves;
mod spawn;
mod terminal;

pub use board::{max_tile, new_game, Board, Cell};
pub use geometry::{reverse, transpose};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use line::{compact, compact_row, merge, merge_row};
pub use moves::{shift, Direction};
pub use spawn::{add_new_tile, spawn_tile, RandomTiles, TileSource, TWO_PROBABILITY};
pub use terminal::is_terminal;
