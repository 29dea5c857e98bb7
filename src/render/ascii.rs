//! Box-drawn board renderer with optional ANSI colors.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use super::RenderStyle;
use crate::game::Board;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";

/// Foreground colors for 2, 4, 8, ... 2048, following the classic palette.
const TILE_COLORS: [&str; 11] = [
    "\x1b[38;5;254m", // 2
    "\x1b[38;5;223m", // 4
    "\x1b[38;5;215m", // 8
    "\x1b[38;5;209m", // 16
    "\x1b[38;5;203m", // 32
    "\x1b[38;5;202m", // 64
    "\x1b[38;5;222m", // 128
    "\x1b[38;5;221m", // 256
    "\x1b[38;5;220m", // 512
    "\x1b[38;5;214m", // 1024
    "\x1b[38;5;226m", // 2048
];

/// Color for anything above 2048.
const SUPER_COLOR: &str = "\x1b[38;5;231m";

/// Narrowest cell, wide enough for "2048".
const MIN_CELL_WIDTH: usize = 4;

/// Render a board as a box-drawn grid.
///
/// Output format (plain):
/// ```text
/// ┌──────┬──────┐
/// │    2 │    . │
/// ├──────┼──────┤
/// │    . │ 2048 │
/// └──────┴──────┘
/// ```
#[must_use]
pub fn render_board(board: &Board, style: RenderStyle) -> String {
    let width = board.max_tile().to_string().len().max(MIN_CELL_WIDTH);
    let size = board.size();
    let mut output = String::new();

    push_border(&mut output, size, width, ('┌', '┬', '┐'));
    for (i, row) in board.rows().enumerate() {
        if i > 0 {
            push_border(&mut output, size, width, ('├', '┼', '┤'));
        }
        output.push('│');
        for &value in row {
            output.push(' ');
            push_tile(&mut output, value, width, style);
            output.push_str(" │");
        }
        output.push('\n');
    }
    push_border(&mut output, size, width, ('└', '┴', '┘'));

    output
}

/// Render a board followed by the step and episode counters.
#[must_use]
pub fn render_frame(board: &Board, step: u64, episode: u64, style: RenderStyle) -> String {
    let mut output = render_board(board, style);
    output.push_str(&format!("step    = {step}\n"));
    output.push_str(&format!("episode = {episode}\n"));
    output
}

fn push_border(output: &mut String, size: usize, width: usize, (left, mid, right): (char, char, char)) {
    output.push(left);
    for col in 0..size {
        if col > 0 {
            output.push(mid);
        }
        for _ in 0..width + 2 {
            output.push('─');
        }
    }
    output.push(right);
    output.push('\n');
}

fn push_tile(output: &mut String, value: u32, width: usize, style: RenderStyle) {
    let text = if value == 0 {
        ".".to_string()
    } else {
        value.to_string()
    };

    match style {
        RenderStyle::Plain => output.push_str(&format!("{text:>width$}")),
        RenderStyle::Ansi => {
            let color = tile_color(value);
            output.push_str(&format!("{color}{text:>width$}{RESET}"));
        }
    }
}

/// ANSI color prefix for a tile value.
fn tile_color(value: u32) -> String {
    if value == 0 {
        return GRAY.to_string();
    }
    let rank = value.trailing_zeros() as usize;
    match TILE_COLORS.get(rank.wrapping_sub(1)) {
        Some(color) if rank >= 3 => format!("{BOLD}{color}"),
        Some(color) => (*color).to_string(),
        None => format!("{BOLD}{SUPER_COLOR}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_layout() {
        let board = Board::from_array([[2, 0], [0, 2048]]).unwrap();
        let text = render_board(&board, RenderStyle::Plain);
        let expected = "\
┌──────┬──────┐
│    2 │    . │
├──────┼──────┤
│    . │ 2048 │
└──────┴──────┘
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_wide_tiles_widen_cells() {
        let board = Board::from_array([[65536, 0], [0, 0]]).unwrap();
        let text = render_board(&board, RenderStyle::Plain);
        assert!(text.contains("│ 65536 │     . │"));
    }

    #[test]
    fn test_ansi_has_escape_codes() {
        let board = Board::from_array([[2, 4096], [0, 8]]).unwrap();
        let text = render_board(&board, RenderStyle::Ansi);
        assert!(text.contains(RESET));
        assert!(text.contains(SUPER_COLOR));
        assert!(text.contains(TILE_COLORS[0]));
        assert!(!render_board(&board, RenderStyle::Plain).contains('\x1b'));
    }

    #[test]
    fn test_frame_footer() {
        let board = Board::new(2).unwrap();
        let frame = render_frame(&board, 12, 3, RenderStyle::Plain);
        assert!(frame.ends_with("step    = 12\nepisode = 3\n"));
    }
}
