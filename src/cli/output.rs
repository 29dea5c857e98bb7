//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string, clippy::cast_precision_loss)]

use serde::Serialize;
use twenty48::rollout::{BatchStats, EpisodeResult};

/// Milestone tiles reported in batch summaries.
const MILESTONES: [u32; 6] = [128, 256, 512, 1024, 2048, 4096];

/// JSON-serializable episode result.
#[derive(Debug, Serialize)]
pub(super) struct JsonEpisodeResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Steps taken.
    pub(super) steps: u64,
    /// Steps that changed the board.
    pub(super) moves: u64,
    /// Highest tile reached.
    pub(super) max_tile: u32,
    /// Sum of tiles on the final board.
    pub(super) tile_sum: u64,
    /// Sum of rewards.
    pub(super) total_reward: f64,
    /// Whether the episode ended with no legal move.
    pub(super) terminal: bool,
    /// Final board as nested rows.
    pub(super) board: Vec<Vec<u32>>,
}

impl JsonEpisodeResult {
    /// Create from an `EpisodeResult`.
    pub(super) fn from_episode(result: &EpisodeResult) -> Self {
        Self {
            seed: result.seed,
            steps: result.steps,
            moves: result.moves,
            max_tile: result.max_tile,
            tile_sum: result.tile_sum,
            total_reward: result.total_reward,
            terminal: result.terminal,
            board: result.final_board.to_rows(),
        }
    }
}

/// Format an episode result as human-readable text.
pub(super) fn format_episode_text(result: &EpisodeResult, board_text: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Episode Result (seed: {})\n", result.seed));
    output.push_str(board_text);
    output.push_str(&format!("  Max tile: {}\n", result.max_tile));
    output.push_str(&format!("  Tile sum: {}\n", result.tile_sum));
    output.push_str(&format!(
        "  Steps: {} ({} moved)\n",
        result.steps, result.moves
    ));
    output.push_str(&format!("  Total reward: {:.2}\n", result.total_reward));
    let end = if result.terminal {
        "no moves left"
    } else {
        "step limit"
    };
    output.push_str(&format!("  Ended: {end}\n"));

    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Episodes played.
    games: u64,
    /// Episodes that ended with no legal move.
    terminal_games: u64,
    /// Highest tile seen.
    best_tile: u32,
    /// Average steps per episode.
    avg_steps: f64,
    /// Average board-changing moves per episode.
    avg_moves: f64,
    /// Average total reward per episode.
    avg_reward: f64,
    /// Per-max-tile counts.
    max_tiles: Vec<JsonTileCount>,
}

/// JSON-serializable max-tile bucket.
#[derive(Debug, Serialize)]
pub(super) struct JsonTileCount {
    /// Final max tile.
    tile: u32,
    /// Episodes ending with it.
    count: u64,
    /// Fraction of episodes reaching at least this tile.
    reach_rate: f64,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            games: stats.games,
            terminal_games: stats.terminal_games,
            best_tile: stats.best_tile,
            avg_steps: stats.avg_steps(),
            avg_moves: stats.avg_moves(),
            avg_reward: stats.avg_reward(),
            max_tiles: stats
                .max_tile_counts
                .iter()
                .map(|(&tile, &count)| JsonTileCount {
                    tile,
                    count,
                    reach_rate: stats.reach_rate(tile),
                })
                .collect(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Batch Results ({} games)\n", stats.games));
    output.push_str("========================================\n\n");

    output.push_str("Max Tile Distribution:\n");
    for (&tile, &count) in &stats.max_tile_counts {
        let share = if stats.games == 0 {
            0.0
        } else {
            count as f64 / stats.games as f64 * 100.0
        };
        output.push_str(&format!("  {tile:>6}: {count:>6} ({share:.1}%)\n"));
    }

    output.push_str("\nReach Rates:\n");
    for tile in MILESTONES {
        output.push_str(&format!(
            "  {tile:>6}: {:.1}%\n",
            stats.reach_rate(tile) * 100.0
        ));
    }

    output.push_str(&format!("\nBest Tile: {}\n", stats.best_tile));
    output.push_str(&format!(
        "Average Episode: {:.0} steps, {:.0} moves, reward {:.1}\n",
        stats.avg_steps(),
        stats.avg_moves(),
        stats.avg_reward()
    ));
    output.push_str(&format!(
        "Ended With No Moves: {} of {}\n",
        stats.terminal_games, stats.games
    ));

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("max_tile,count,reach_rate\n");

    // Data rows
    for (&tile, &count) in &stats.max_tile_counts {
        output.push_str(&format!(
            "{},{},{:.4}\n",
            tile,
            count,
            stats.reach_rate(tile)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48::rollout::{run_episode, RolloutConfig};

    fn sample_stats() -> BatchStats {
        let config = RolloutConfig {
            max_steps: 30,
            ..RolloutConfig::default()
        };
        let mut stats = BatchStats::new();
        for seed in 0..4 {
            if let Ok(result) = run_episode(seed, &config, |_| {}) {
                stats.add_result(&result);
            }
        }
        stats
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let stats = sample_stats();
        let csv = format_batch_csv(&stats);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("max_tile,count,reach_rate"));
        assert_eq!(lines.count(), stats.max_tile_counts.len());
    }

    #[test]
    fn test_batch_text_mentions_games() {
        let text = format_batch_text(&sample_stats());
        assert!(text.starts_with("Batch Results (4 games)"));
        assert!(text.contains("Reach Rates:"));
    }

    #[test]
    fn test_episode_json_has_board_rows() {
        let config = RolloutConfig {
            max_steps: 10,
            ..RolloutConfig::default()
        };
        let Ok(result) = run_episode(5, &config, |_| {}) else {
            panic!("episode failed");
        };
        let json = JsonEpisodeResult::from_episode(&result);
        assert_eq!(json.board.len(), 4);
        assert_eq!(json.steps, 10);
    }
}
