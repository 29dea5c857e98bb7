//! twenty48 CLI - play 2048 in the terminal or run random-policy episodes.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// twenty48 - the 2048 sliding-tile game
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tracing filter, e.g. "info", "twenty48=debug".
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one episode with a random policy
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board side length (default: 4)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Maximum steps (default: 10000)
        #[arg(short = 'n', long, default_value = "10000")]
        max_steps: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save one rendered frame per step into this directory
        #[arg(long)]
        frames: Option<std::path::PathBuf>,

        /// Suppress the per-episode header
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many random-policy episodes in parallel and aggregate statistics
    Batch {
        /// Number of episodes to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each episode)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Board side length (default: 4)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Maximum steps per episode (default: 10000)
        #[arg(short = 'n', long, default_value = "10000")]
        max_steps: u64,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Interactive game in the terminal
    Play {
        /// Board side length (default: 4)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so JSON/CSV on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match args.command {
        Commands::Run {
            seed,
            size,
            max_steps,
            format,
            frames,
            quiet,
        } => cli::run::execute(seed, size, max_steps, format, frames, quiet),

        Commands::Batch {
            games,
            seed,
            threads,
            size,
            max_steps,
            format,
            progress,
        } => cli::batch::execute(games, seed, threads, size, max_steps, format, progress),

        Commands::Play { size, seed } => cli::play::execute(size, seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
