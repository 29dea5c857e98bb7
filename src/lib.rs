// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! twenty48: a deterministic core for the 2048 sliding-tile game.
//!
//! This crate provides:
//! - A size-generic square board with the four directional moves
//! - Seeded, injectable tile spawning
//! - Terminal-state detection
//! - An episodic environment with reward and observation semantics
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    Rollout driver / CLI / TUI       │
//! ├─────────────────────────────────────┤
//! │    Environment (reset / step)       │
//! ├─────────────────────────────────────┤
//! │    Game core (board, moves, spawn)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every move is the same left-move routine wrapped in orientation
//! transforms:
//!
//! ```
//! use twenty48::{shift, Board, Direction};
//!
//! let board = Board::from_array([[2, 0, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let (after, moved) = shift(&board, Direction::Left);
//! assert!(moved);
//! assert_eq!(after.to_rows()[0], vec![4, 0, 0, 0]);
//! ```

pub mod env;
pub mod error;
pub mod game;
pub mod render;
pub mod rollout;

pub use error::{GameError, GameResult};

// Re-export the core operations at crate root for convenience
pub use game::{
    add_new_tile, is_terminal, max_tile, new_game, shift, Board, Cell, Direction, RandomTiles,
    TileSource,
};
