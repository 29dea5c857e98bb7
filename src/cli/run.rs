//! Run command implementation.

use super::output::{format_episode_text, JsonEpisodeResult};
use super::{rollout_config, seed_or_clock, CliError, OutputFormat};
use std::io;
use std::path::PathBuf;
use twenty48::render::{render_board, FrameWriter, RenderStyle};
use twenty48::rollout::run_episode;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the episode cannot start or a frame cannot be written.
pub(crate) fn execute(
    seed: Option<u64>,
    size: usize,
    max_steps: u64,
    format: OutputFormat,
    frames: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let config = rollout_config(size, max_steps);

    if !quiet && format == OutputFormat::Text {
        println!("Running episode with seed {seed} on a {size}x{size} board...");
        println!();
    }

    let writer = frames.map(FrameWriter::new);
    // Keep the first write failure; the episode itself still finishes
    let mut frame_error: Option<io::Error> = None;

    let result = run_episode(seed, &config, |env| {
        let Some(writer) = &writer else {
            return;
        };
        if frame_error.is_some() {
            return;
        }
        let frame = env.render(RenderStyle::Plain);
        if let Err(e) = writer.save(env.total_steps(), &frame) {
            tracing::warn!(dir = %writer.dir().display(), error = %e, "failed to save frame");
            frame_error = Some(e);
        }
    })?;

    if let Some(e) = frame_error {
        return Err(CliError::new(format!("Failed to save frame: {e}")));
    }

    if let Some(writer) = &writer {
        if !quiet && format == OutputFormat::Text {
            println!("Frames saved to: {}", writer.dir().display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            let board = render_board(&result.final_board, RenderStyle::Ansi);
            print!("{}", format_episode_text(&result, &board));
        }
        OutputFormat::Json => {
            let json_result = JsonEpisodeResult::from_episode(&result);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
