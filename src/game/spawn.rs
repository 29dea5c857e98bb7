//! Tile spawning.
//!
//! Randomness is injected through [`TileSource`] so games can be replayed
//! from a seed and tests can script exact spawns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GameError, GameResult};
use crate::game::{Board, Cell};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Source of spawn decisions: a cell choice and a weighted coin flip.
///
/// The spawner maps the coin to the tile value, so a source can never
/// place anything but a 2 or a 4.
pub trait TileSource {
    /// Pick an index in `0..empty_cells`. `empty_cells` is never zero.
    fn choose_cell(&mut self, empty_cells: usize) -> usize;

    /// Whether the new tile is a 4 rather than a 2.
    fn choose_four(&mut self) -> bool;
}

/// [`TileSource`] backed by a `rand` generator.
///
/// Cells are uniform over the empty ones; values are 2 with probability
/// [`TWO_PROBABILITY`], else 4.
#[derive(Debug, Clone)]
pub struct RandomTiles<R> {
    rng: R,
}

impl<R: Rng> RandomTiles<R> {
    /// Wrap an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomTiles<StdRng> {
    /// Reproducible source seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TileSource for RandomTiles<R> {
    fn choose_cell(&mut self, empty_cells: usize) -> usize {
        self.rng.gen_range(0..empty_cells)
    }

    fn choose_four(&mut self) -> bool {
        !self.rng.gen_bool(TWO_PROBABILITY)
    }
}

impl<S: TileSource + ?Sized> TileSource for &mut S {
    fn choose_cell(&mut self, empty_cells: usize) -> usize {
        (**self).choose_cell(empty_cells)
    }

    fn choose_four(&mut self) -> bool {
        (**self).choose_four()
    }
}

/// Place one new tile on a random empty cell, in place.
///
/// Returns the cell that was filled. The board is left untouched on error.
///
/// # Errors
///
/// Returns [`GameError::NoEmptyCell`] if the board is full,
/// [`GameError::InvalidCellChoice`] if the source picks an index past the
/// empty cells, and [`GameError::TileSumOverflow`] if the new tile would push
/// the tile sum past `u32::MAX`.
pub fn spawn_tile<S: TileSource + ?Sized>(board: &mut Board, source: &mut S) -> GameResult<Cell> {
    let empty: Vec<Cell> = board.empty_cells().collect();
    if empty.is_empty() {
        return Err(GameError::NoEmptyCell);
    }

    let index = source.choose_cell(empty.len());
    let cell = *empty.get(index).ok_or(GameError::InvalidCellChoice {
        index,
        empty_cells: empty.len(),
    })?;
    let value = if source.choose_four() { 4 } else { 2 };

    // Every tile is at most the sum, so bounding the sum keeps merges in range
    if board.tile_sum() + u64::from(value) > u64::from(u32::MAX) {
        return Err(GameError::TileSumOverflow);
    }
    board.set(cell, value);

    tracing::trace!(%cell, value, "spawned tile");
    Ok(cell)
}

/// Return `board` with one new tile on a random empty cell.
///
/// # Errors
///
/// Same as [`spawn_tile`].
pub fn add_new_tile<S: TileSource + ?Sized>(mut board: Board, source: &mut S) -> GameResult<Board> {
    spawn_tile(&mut board, source)?;
    Ok(board)
}
