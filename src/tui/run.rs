//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::db::Store;
use crate::error::Result;
use crate::tui::app::App;

/// Take over the terminal, run `app` until the user quits, and hand the
/// terminal back.
///
/// The terminal is restored before any error from the event loop is returned,
/// so the caller can print it to a normal screen.
pub fn run_tui<S: Store>(mut app: App<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match terminal.size() {
        Ok(size) => {
            app.handle_resize(size.width);
            app.run(&mut terminal)
        }
        Err(e) => Err(e.into()),
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Session ended with {} tasks", app.tasks().len());
    result
}
