//! Episodic environment around the game core.
//!
//! Exposes the reset/step interface of a reinforcement-learning environment:
//! four discrete actions, the flattened board as observation, and a reward
//! that pays for raising the highest tile.
//!
//! # Reward
//!
//! - If neither the previous step nor this one moved: `idle_penalty`.
//! - Otherwise: `(max_tile - previous max_tile) + move_bonus`.
//!
//! A new tile is spawned only after a move that changed the board.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::{
    assert_invariants, is_terminal, shift, spawn_tile, Board, Direction, RandomTiles, TileSource,
};
use crate::render::{render_frame, RenderStyle};

/// Configuration for the environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Side length of the board.
    pub board_size: usize,
    /// Reward when two consecutive steps both fail to move.
    pub idle_penalty: f64,
    /// Constant added to the max-tile gain on every other step.
    pub move_bonus: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            board_size: 4,
            idle_penalty: -0.01,
            move_bonus: 10.0,
        }
    }
}

/// Per-step diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Highest tile after the step.
    pub max_tile: u32,
    /// Whether the action changed the board.
    pub moved: bool,
}

/// Result of one environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Row-major board after the step.
    pub observation: Vec<u32>,
    /// Reward for the step.
    pub reward: f64,
    /// Whether the board admits no further move.
    pub terminal: bool,
    /// Extra diagnostics.
    pub info: StepInfo,
}

/// The environment.
#[derive(Debug, Clone)]
pub struct Env<S> {
    config: EnvConfig,
    source: S,
    /// `None` until the first reset.
    board: Option<Board>,
    episode: u64,
    step_count: u64,
    total_steps: u64,
    prev_max_tile: u32,
    prev_moved: bool,
}

impl<S: TileSource> Env<S> {
    /// Actions in index order.
    pub const ACTIONS: [Direction; 4] = Direction::ALL;

    /// Create an environment. Call [`Env::reset`] before stepping.
    #[must_use]
    pub fn new(config: EnvConfig, source: S) -> Self {
        Self {
            config,
            source,
            board: None,
            episode: 0,
            step_count: 0,
            total_steps: 0,
            prev_max_tile: 0,
            prev_moved: true,
        }
    }

    /// Number of discrete actions.
    #[must_use]
    pub const fn action_count(&self) -> usize {
        Self::ACTIONS.len()
    }

    /// Length of an observation vector.
    #[must_use]
    pub const fn observation_len(&self) -> usize {
        self.config.board_size.saturating_mul(self.config.board_size)
    }

    /// Start a new episode: empty board plus two spawned tiles.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSize`] for a zero board size and
    /// [`GameError::NoEmptyCell`] for a 1×1 board.
    pub fn reset(&mut self) -> GameResult<Vec<u32>> {
        let mut board = Board::new(self.config.board_size)?;
        spawn_tile(&mut board, &mut self.source)?;
        spawn_tile(&mut board, &mut self.source)?;

        self.episode += 1;
        self.step_count = 0;
        self.prev_max_tile = 0;
        self.prev_moved = true;

        tracing::debug!(episode = self.episode, ?board, "episode reset");

        let observation = board.cells().to_vec();
        self.board = Some(board);
        Ok(observation)
    }

    /// Apply action `action` (0 = up, 1 = down, 2 = left, 3 = right).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDirection`] for an action outside 0..4
    /// and [`GameError::EpisodeNotStarted`] before the first reset.
    pub fn step(&mut self, action: u8) -> GameResult<Step> {
        let direction = Direction::try_from(action)?;
        self.step_direction(direction)
    }

    /// Apply a move given as a [`Direction`].
    ///
    /// On error the board, counters, and reward state are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EpisodeNotStarted`] before the first reset, and
    /// any spawn error from [`spawn_tile`] after a move.
    pub fn step_direction(&mut self, direction: Direction) -> GameResult<Step> {
        let board = self.board.as_ref().ok_or(GameError::EpisodeNotStarted)?;

        let (mut next, moved) = shift(board, direction);
        if moved {
            spawn_tile(&mut next, &mut self.source)?;
        }
        assert_invariants(&next);

        // Counters only advance once the step can no longer fail
        self.step_count += 1;
        self.total_steps += 1;

        let terminal = is_terminal(&next);
        let max_tile = next.max_tile();
        let reward = if !self.prev_moved && !moved {
            self.config.idle_penalty
        } else {
            f64::from(max_tile) - f64::from(self.prev_max_tile) + self.config.move_bonus
        };

        self.prev_moved = moved;
        self.prev_max_tile = max_tile;

        tracing::debug!(
            episode = self.episode,
            step = self.step_count,
            %direction,
            moved,
            max_tile,
            reward,
            terminal,
            "step"
        );

        let observation = next.cells().to_vec();
        self.board = Some(next);

        Ok(Step {
            observation,
            reward,
            terminal,
            info: StepInfo { max_tile, moved },
        })
    }

    /// Current board, `None` before the first reset.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Highest tile on the current board, 0 before the first reset.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.board.as_ref().map_or(0, Board::max_tile)
    }

    /// Whether the current board admits no move.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.as_ref().is_some_and(is_terminal)
    }

    /// Episode number, starting at 1 after the first reset.
    #[must_use]
    pub const fn episode(&self) -> u64 {
        self.episode
    }

    /// Steps taken in the current episode.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Steps taken across all episodes.
    #[must_use]
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Render the current board with step and episode counters.
    ///
    /// Returns an empty string before the first reset.
    #[must_use]
    pub fn render(&self, style: RenderStyle) -> String {
        self.board.as_ref().map_or_else(String::new, |board| {
            render_frame(board, self.step_count, self.episode, style)
        })
    }
}

impl Env<RandomTiles<rand::rngs::StdRng>> {
    /// Environment whose spawns are reproducible from `seed`.
    #[must_use]
    pub fn seeded(config: EnvConfig, seed: u64) -> Self {
        Self::new(config, RandomTiles::seeded(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always fills the first empty cell with a 2.
    struct FirstCell;

    impl TileSource for FirstCell {
        fn choose_cell(&mut self, _empty_cells: usize) -> usize {
            0
        }

        fn choose_four(&mut self) -> bool {
            false
        }
    }

    fn fixed_env() -> Env<FirstCell> {
        Env::new(EnvConfig::default(), FirstCell)
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = fixed_env();
        assert_eq!(env.step(0), Err(GameError::EpisodeNotStarted));
        assert!(env.render(RenderStyle::Plain).is_empty());
        assert_eq!(env.max_tile(), 0);
    }

    #[test]
    fn test_reset_spawns_two_tiles() {
        let mut env = fixed_env();
        let obs = env.reset().unwrap();
        assert_eq!(obs.len(), env.observation_len());
        assert_eq!(&obs[..4], &[2, 2, 0, 0]);
        assert_eq!(obs.iter().filter(|&&v| v != 0).count(), 2);
        assert_eq!(env.episode(), 1);
        assert_eq!(env.step_count(), 0);
    }

    #[test]
    fn test_invalid_action() {
        let mut env = fixed_env();
        env.reset().unwrap();
        assert_eq!(env.step(4), Err(GameError::InvalidDirection(4)));
        assert_eq!(env.step_count(), 0);
    }

    #[test]
    fn test_merge_reward_and_spawn() {
        let mut env = fixed_env();
        env.reset().unwrap();

        // [2, 2, 0, 0] left -> [4, 0, 0, 0], then a 2 lands at (0, 1).
        let step = env.step(Direction::Left.index()).unwrap();
        assert!(step.info.moved);
        assert_eq!(step.info.max_tile, 4);
        assert_eq!(&step.observation[..4], &[4, 2, 0, 0]);
        assert!((step.reward - 14.0).abs() < 1e-9);
        assert!(!step.terminal);
    }

    #[test]
    fn test_idle_penalty_needs_two_idle_steps() {
        let mut env = fixed_env();
        env.reset().unwrap();

        // Up does nothing on [2, 2, 0, 0] in the top row.
        let first = env.step(Direction::Up.index()).unwrap();
        assert!(!first.info.moved);
        // Previous step counts as moved after a reset, and the max tile rose from 0 to 2.
        assert!((first.reward - 12.0).abs() < 1e-9);

        let second = env.step(Direction::Up.index()).unwrap();
        assert!(!second.info.moved);
        assert!((second.reward + 0.01).abs() < 1e-9);
        assert_eq!(env.step_count(), 2);
        assert_eq!(env.total_steps(), 2);
    }

    #[test]
    fn test_reset_clears_episode_counters() {
        let mut env = fixed_env();
        env.reset().unwrap();
        env.step(2).unwrap();
        env.step(3).unwrap();
        env.reset().unwrap();
        assert_eq!(env.episode(), 2);
        assert_eq!(env.step_count(), 0);
        assert_eq!(env.total_steps(), 2);
    }

    #[test]
    fn test_render_includes_counters() {
        let mut env = fixed_env();
        env.reset().unwrap();
        env.step(2).unwrap();
        let frame = env.render(RenderStyle::Plain);
        assert!(frame.contains("step    = 1"));
        assert!(frame.contains("episode = 1"));
    }

    /// Offers a cell index that never exists.
    struct OutOfRange;

    impl TileSource for OutOfRange {
        fn choose_cell(&mut self, empty_cells: usize) -> usize {
            empty_cells
        }

        fn choose_four(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn test_failed_spawn_leaves_counters() {
        let mut env = fixed_env();
        env.reset().unwrap();

        // Swap in a source that cannot place the post-move tile
        let mut broken = Env {
            config: env.config,
            source: OutOfRange,
            board: env.board.clone(),
            episode: env.episode,
            step_count: env.step_count,
            total_steps: env.total_steps,
            prev_max_tile: env.prev_max_tile,
            prev_moved: env.prev_moved,
        };
        let before = broken.board.clone();

        let result = broken.step(Direction::Left.index());
        assert_eq!(
            result,
            Err(GameError::InvalidCellChoice {
                index: 15,
                empty_cells: 15,
            })
        );
        assert_eq!(broken.step_count(), 0);
        assert_eq!(broken.total_steps(), 0);
        assert_eq!(broken.board, before);
    }

    #[test]
    fn test_one_by_one_board_cannot_reset() {
        let config = EnvConfig {
            board_size: 1,
            ..EnvConfig::default()
        };
        let mut env = Env::seeded(config, 3);
        assert_eq!(env.reset(), Err(GameError::NoEmptyCell));
    }
}
