//! Text rendering for boards and episode frames.
//!
//! Frames are plain strings, so they can be printed, logged, or written to
//! disk with [`FrameWriter`] (one file per step).

mod ascii;
mod frames;

pub use ascii::{render_board, render_frame};
pub use frames::FrameWriter;

/// How to draw tile values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// No escape codes.
    #[default]
    Plain,
    /// ANSI 256-colour codes, coloured by tile value.
    Ansi,
}
