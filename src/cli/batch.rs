//! Batch command implementation.

use super::output::{format_batch_csv, format_batch_text, JsonBatchResult};
use super::{rollout_config, seed_or_clock, BatchFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use twenty48::rollout::{run_episode, BatchStats, RolloutConfig};
use twenty48::GameResult;

/// Execute the batch command.
///
/// # Errors
///
/// Returns the first episode error, such as an invalid board size, or an
/// output error.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    size: usize,
    max_steps: u64,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = rollout_config(size, max_steps);

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_clock(seed);

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        let pb = ProgressBar::new(games);
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let stats = collect_stats(games, base_seed, &config, pb.as_ref());

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    let stats = stats?;

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    tracing::info!(
        games = stats.games,
        best_tile = stats.best_tile,
        seconds = duration.as_secs_f64(),
        "batch finished"
    );

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} games/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}

/// Play `games` episodes from consecutive seeds in parallel.
///
/// Stops at the first episode that fails and returns its error.
fn collect_stats(
    games: u64,
    base_seed: u64,
    config: &RolloutConfig,
    pb: Option<&ProgressBar>,
) -> GameResult<BatchStats> {
    // Each worker folds into its own stats; partials merge at the end
    (0..games)
        .into_par_iter()
        .try_fold(BatchStats::new, |mut local, i| -> GameResult<BatchStats> {
            let game_seed = base_seed.wrapping_add(i);
            let result = run_episode(game_seed, config, |_| {}).inspect_err(|e| {
                tracing::error!(seed = game_seed, error = %e, "episode failed");
            })?;
            local.add_result(&result);
            if let Some(pb) = pb {
                pb.inc(1);
            }
            Ok(local)
        })
        .try_reduce(BatchStats::new, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })
}
