//! CLI command implementations for twenty48.

pub(crate) mod batch;
pub(crate) mod play;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<twenty48::GameError> for CliError {
    fn from(e: twenty48::GameError) -> Self {
        Self::new(e.to_string())
    }
}

/// Seed from the clock when none is given.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Rollout settings for a board size and step limit.
pub(crate) fn rollout_config(size: usize, max_steps: u64) -> twenty48::rollout::RolloutConfig {
    use twenty48::env::EnvConfig;
    use twenty48::rollout::RolloutConfig;

    RolloutConfig {
        max_steps,
        env: EnvConfig {
            board_size: size,
            ..EnvConfig::default()
        },
    }
}
