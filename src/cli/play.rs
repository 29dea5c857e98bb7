//! Play command implementation - interactive TUI game.

use super::{seed_or_clock, CliError};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::stdout;
use std::time::Duration;
use twenty48::env::{EnvConfig, Step};
use twenty48::rollout::SeededEnv;
use twenty48::{Direction, GameResult};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board size is invalid or the terminal fails.
pub(crate) fn execute(size: usize, seed: Option<u64>) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let config = EnvConfig {
        board_size: size,
        ..EnvConfig::default()
    };

    // Reset before touching the terminal so a bad size is a plain error
    let mut app = App::new(SeededEnv::seeded(config, seed), seed);
    app.restart()?;

    run_tui(app)
}

/// App state for the TUI.
#[derive(Debug)]
struct App {
    env: SeededEnv,
    seed: u64,
    score: f64,
    last_moved: bool,
}

impl App {
    fn new(env: SeededEnv, seed: u64) -> Self {
        Self {
            env,
            seed,
            score: 0.0,
            last_moved: true,
        }
    }

    fn restart(&mut self) -> GameResult<()> {
        self.env.reset()?;
        self.score = 0.0;
        self.last_moved = true;
        Ok(())
    }

    fn play(&mut self, direction: Direction) -> GameResult<()> {
        if self.env.is_terminal() {
            return Ok(());
        }
        let Step { reward, info, .. } = self.env.step_direction(direction)?;
        self.score += reward;
        self.last_moved = info.moved;
        Ok(())
    }
}

/// Map a key to a move: arrows, WASD, or vi keys.
fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Some(Direction::Right),
        _ => None,
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let outcome = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => app.restart()?,
                code => {
                    if let Some(direction) = key_direction(code) {
                        app.play(direction)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(6),    // Board
        Constraint::Length(3), // Footer
    ])
    .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.env.is_terminal() {
        "GAME OVER"
    } else if app.last_moved {
        "PLAYING"
    } else {
        "NO MOVE"
    };

    let title = format!(
        " 2048 | Episode {} | Step {} | {} ",
        app.env.episode(),
        app.env.step_count(),
        status
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(board) = app.env.board() {
        let width = board.max_tile().to_string().len().max(4);
        for row in board.rows() {
            lines.push(Line::from(""));
            let spans: Vec<Span> = row
                .iter()
                .map(|&value| {
                    let text = if value == 0 {
                        format!(" {:^width$} ", ".")
                    } else {
                        format!(" {value:^width$} ")
                    };
                    Span::styled(text, tile_style(value))
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

fn tile_style(value: u32) -> Style {
    let color = match value {
        0 => Color::DarkGray,
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::LightMagenta,
        128 => Color::Magenta,
        256 => Color::LightBlue,
        512 => Color::Blue,
        1024 => Color::LightCyan,
        2048 => Color::Cyan,
        _ => Color::LightGreen,
    };

    let style = Style::default().fg(color);
    if value >= 8 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let (tile_sum, empty) = app
        .env
        .board()
        .map_or((0, 0), |board| (board.tile_sum(), board.count_empty()));

    let lines = vec![
        Line::from(""),
        Line::from(format!("  Max tile: {}", app.env.max_tile())),
        Line::from(format!("  Tile sum: {tile_sum}")),
        Line::from(format!("  Empty:    {empty}")),
        Line::from(format!("  Reward:   {:.2}", app.score)),
        Line::from(""),
        Line::from(format!("  Seed:     {}", app.seed)),
    ];

    let stats_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Stats "));

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.env.is_terminal() {
        " [q] Quit  [r] Restart "
    } else {
        " [q] Quit  [←↑↓→/wasd/hjkl] Move  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_direction(KeyCode::Up), Some(Direction::Up));
        assert_eq!(key_direction(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(key_direction(KeyCode::Char('j')), Some(Direction::Down));
        assert_eq!(key_direction(KeyCode::Char('l')), Some(Direction::Right));
        assert_eq!(key_direction(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_app_restart_resets_score() {
        let mut app = App::new(SeededEnv::seeded(EnvConfig::default(), 9), 9);
        app.restart().unwrap();
        app.play(Direction::Left).unwrap();
        app.play(Direction::Up).unwrap();
        app.restart().unwrap();
        assert!(app.score.abs() < f64::EPSILON);
        assert_eq!(app.env.step_count(), 0);
        assert_eq!(app.env.episode(), 2);
    }
}
