//! Episode driver for batch runs.
//!
//! Provides a pure function interface: `(seed, config) -> EpisodeResult`.
//! Actions are drawn uniformly at random from a generator seeded apart from
//! the spawn source, so a seed fixes the whole episode.

// Averages convert counters to f64
#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::env::{Env, EnvConfig};
use crate::error::{GameError, GameResult};
use crate::game::{Board, Direction, RandomTiles};

/// Mixed into the seed for the action generator.
const POLICY_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Environment type driven by [`run_episode`].
pub type SeededEnv = Env<RandomTiles<StdRng>>;

/// Configuration for a rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutConfig {
    /// Step limit per episode.
    pub max_steps: u64,
    /// Environment settings.
    pub env: EnvConfig,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            env: EnvConfig::default(),
        }
    }
}

/// Final result of one episode.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeResult {
    /// The seed used for this episode.
    pub seed: u64,
    /// Steps taken, including ones that did not move.
    pub steps: u64,
    /// Steps that changed the board.
    pub moves: u64,
    /// Highest tile reached.
    pub max_tile: u32,
    /// Sum of tiles on the final board.
    pub tile_sum: u64,
    /// Sum of step rewards.
    pub total_reward: f64,
    /// Whether the episode ended on a board with no legal move.
    pub terminal: bool,
    /// The final board.
    pub final_board: Board,
}

/// Play one episode with a uniformly random policy.
///
/// `observer` is called after the reset and after every step.
///
/// # Errors
///
/// Returns an error if the configured board size is invalid.
pub fn run_episode<F>(seed: u64, config: &RolloutConfig, mut observer: F) -> GameResult<EpisodeResult>
where
    F: FnMut(&SeededEnv),
{
    let mut env = Env::seeded(config.env, seed);
    let mut policy = StdRng::seed_from_u64(seed ^ POLICY_SALT);

    env.reset()?;
    observer(&env);

    let mut moves = 0u64;
    let mut total_reward = 0.0;
    let mut terminal = env.is_terminal();

    while !terminal && env.step_count() < config.max_steps {
        let direction = Direction::ALL[policy.gen_range(0..Direction::ALL.len())];
        let step = env.step_direction(direction)?;
        if step.info.moved {
            moves += 1;
        }
        total_reward += step.reward;
        terminal = step.terminal;
        observer(&env);
    }

    let final_board = env.board().cloned().ok_or(GameError::EpisodeNotStarted)?;

    tracing::debug!(
        seed,
        steps = env.step_count(),
        max_tile = final_board.max_tile(),
        terminal,
        "episode finished"
    );

    Ok(EpisodeResult {
        seed,
        steps: env.step_count(),
        moves,
        max_tile: final_board.max_tile(),
        tile_sum: final_board.tile_sum(),
        total_reward,
        terminal,
        final_board,
    })
}

/// Aggregate statistics over many episodes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    /// Episodes played.
    pub games: u64,
    /// Episodes that ended on a terminal board.
    pub terminal_games: u64,
    /// Highest tile seen in any episode.
    pub best_tile: u32,
    /// Number of episodes per final max tile.
    pub max_tile_counts: BTreeMap<u32, u64>,
    total_steps: u64,
    total_moves: u64,
    total_reward: f64,
}

impl BatchStats {
    /// Empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an episode result.
    pub fn add_result(&mut self, result: &EpisodeResult) {
        self.games += 1;
        if result.terminal {
            self.terminal_games += 1;
        }
        self.best_tile = self.best_tile.max(result.max_tile);
        *self.max_tile_counts.entry(result.max_tile).or_insert(0) += 1;
        self.total_steps += result.steps;
        self.total_moves += result.moves;
        self.total_reward += result.total_reward;
    }

    /// Fold another set of statistics into this one.
    pub fn merge(&mut self, other: &BatchStats) {
        self.games += other.games;
        self.terminal_games += other.terminal_games;
        self.best_tile = self.best_tile.max(other.best_tile);
        for (&tile, &count) in &other.max_tile_counts {
            *self.max_tile_counts.entry(tile).or_insert(0) += count;
        }
        self.total_steps += other.total_steps;
        self.total_moves += other.total_moves;
        self.total_reward += other.total_reward;
    }

    /// Average steps per episode.
    #[must_use]
    pub fn avg_steps(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.games as f64
    }

    /// Average board-changing moves per episode.
    #[must_use]
    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }

    /// Average total reward per episode.
    #[must_use]
    pub fn avg_reward(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_reward / self.games as f64
    }

    /// Fraction of episodes whose max tile reached at least `tile` (0.0-1.0).
    #[must_use]
    pub fn reach_rate(&self, tile: u32) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let reached: u64 = self.max_tile_counts.range(tile..).map(|(_, &count)| count).sum();
        reached as f64 / self.games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_is_deterministic() {
        let config = RolloutConfig::default();
        let a = run_episode(42, &config, |_| {}).unwrap();
        let b = run_episode(42, &config, |_| {}).unwrap();
        assert_eq!(a.final_board, b.final_board);
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.moves, b.moves);
    }

    #[test]
    fn test_episode_respects_step_limit() {
        let config = RolloutConfig {
            max_steps: 5,
            ..RolloutConfig::default()
        };
        let result = run_episode(1, &config, |_| {}).unwrap();
        assert_eq!(result.steps, 5);
        assert!(result.moves <= 5);
    }

    #[test]
    fn test_episode_runs_to_terminal() {
        let result = run_episode(7, &RolloutConfig::default(), |_| {}).unwrap();
        assert!(result.terminal);
        assert!(result.final_board.is_terminal());
        assert!(result.max_tile >= 4);
        assert_eq!(result.tile_sum, result.final_board.tile_sum());
    }

    #[test]
    fn test_observer_sees_every_step() {
        let config = RolloutConfig {
            max_steps: 20,
            ..RolloutConfig::default()
        };
        let mut seen = Vec::new();
        let result = run_episode(3, &config, |env| seen.push(env.step_count())).unwrap();
        assert_eq!(seen.len() as u64, result.steps + 1);
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&result.steps));
    }

    #[test]
    fn test_invalid_board_size() {
        let config = RolloutConfig {
            env: EnvConfig {
                board_size: 0,
                ..EnvConfig::default()
            },
            ..RolloutConfig::default()
        };
        assert!(run_episode(0, &config, |_| {}).is_err());
    }

    #[test]
    fn test_batch_stats_merge() {
        let config = RolloutConfig {
            max_steps: 50,
            ..RolloutConfig::default()
        };
        let results: Vec<_> = (0..6)
            .map(|seed| run_episode(seed, &config, |_| {}).unwrap())
            .collect();

        let mut all = BatchStats::new();
        for result in &results {
            all.add_result(result);
        }

        let mut left = BatchStats::new();
        let mut right = BatchStats::new();
        for result in &results[..3] {
            left.add_result(result);
        }
        for result in &results[3..] {
            right.add_result(result);
        }
        left.merge(&right);

        assert_eq!(left.games, 6);
        assert_eq!(left.max_tile_counts, all.max_tile_counts);
        assert_eq!(left.best_tile, all.best_tile);
        assert!((left.avg_steps() - all.avg_steps()).abs() < 1e-9);
        assert!((left.reach_rate(2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = BatchStats::new();
        assert!(stats.avg_steps().abs() < f64::EPSILON);
        assert!(stats.reach_rate(2048).abs() < f64::EPSILON);
    }
}
