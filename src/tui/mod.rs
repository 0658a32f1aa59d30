//! Terminal widget for pomotally.
//!
//! Hosts a [`PomodoroWidget`](crate::features::widget::PomodoroWidget) in a
//! ratatui/crossterm loop driven by the engine's tick deadline.

mod app;
mod display;
mod event;
mod ui;

pub use app::App;
pub use display::{Rendered, TerminalDisplay};

use std::io;
use std::rc::Rc;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::prelude::*;

use crate::cli::commands::open_store;
use crate::config::{Config, Paths};
use crate::error::PomotallyError;
use crate::features::widget::SharedStore;
use crate::storage::MemoryStore;

/// Run the terminal widget.
///
/// If the database cannot be opened the widget still runs over an in-memory
/// store, and says so in the status bar.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run(paths: &Paths, config: &Config) -> Result<(), PomotallyError> {
    let (store, store_warning): (SharedStore, _) = match open_store(paths) {
        Ok(store) => (store, None),
        Err(e) => {
            warn!("Falling back to in-memory store: {e}");
            let fallback: SharedStore = Rc::new(MemoryStore::new());
            (fallback, Some(e))
        }
    };

    let mut app = App::new(store, config)?;
    if let Some(e) = store_warning {
        app.status = Some(format!("{e} (history will not be saved)"));
    }

    enable_raw_mode()
        .map_err(|e| PomotallyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomotallyError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomotallyError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PomotallyError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomotallyError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Skip => app.handle_skip(),
                event::Action::ToggleChart => app.toggle_chart(),
                event::Action::SwitchView => app.switch_view(),
            }
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}
