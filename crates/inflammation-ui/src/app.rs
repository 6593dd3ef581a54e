//! Full-screen terminal rendering.
//!
//! [`TerminalVisualizer`] takes over the terminal with an alternate screen,
//! draws a view, and blocks until the user presses `q`, `Esc` or `Ctrl+C`.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::debug;

use inflammation_core::graph::{GraphData, Visualizer};
use inflammation_core::models::Matrix;
use inflammation_core::{InflammationError, Result};

use crate::chart_view;
use crate::table_view;
use crate::themes::Theme;

/// Interactive renderer that draws charts and tables in the terminal.
pub struct TerminalVisualizer {
    pub theme: Theme,
}

impl TerminalVisualizer {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    /// Show `matrix` as a table until the user quits.
    pub fn show_matrix(
        &mut self,
        title: &str,
        matrix: &Matrix,
        first_patient: usize,
        decimals: usize,
    ) -> Result<()> {
        let theme = &self.theme;
        run_until_quit(|frame| {
            table_view::render_matrix_table(
                frame,
                frame.area(),
                title,
                matrix,
                first_patient,
                decimals,
                theme,
            )
        })
    }
}

impl Visualizer for TerminalVisualizer {
    fn visualize(&mut self, data: &GraphData) -> Result<()> {
        debug!("Plotting {} series", data.len());
        let theme = &self.theme;
        run_until_quit(|frame| chart_view::render_graph(frame, frame.area(), data, theme))
    }
}

/// `true` for the keys that close a view.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Redraw with `draw` until a quit key arrives, restoring the terminal on
/// every exit path.
fn run_until_quit(mut draw: impl FnMut(&mut Frame)) -> Result<()> {
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(terminal_error(e));
    }

    let result = event_loop(&mut draw);

    // Restore terminal state unconditionally.
    let restore = disable_raw_mode()
        .and_then(|_| execute!(io::stdout(), LeaveAlternateScreen))
        .map_err(terminal_error);

    result.and(restore)
}

fn event_loop(draw: &mut impl FnMut(&mut Frame)) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| draw(frame)).map_err(terminal_error)?;

        if event::poll(tick_rate).map_err(terminal_error)? {
            if let Event::Key(key) = event::read().map_err(terminal_error)? {
                if is_quit_key(&key) {
                    break;
                }
            }
        }
    }

    terminal.show_cursor().map_err(terminal_error)?;
    Ok(())
}

fn terminal_error(e: io::Error) -> InflammationError {
    InflammationError::Terminal(e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
