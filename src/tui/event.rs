//! Event handling for the terminal widget.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::PomotallyError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Start or pause the countdown.
    Toggle,
    Reset,
    /// Skip the current session (after confirmation).
    Skip,
    ToggleChart,
    /// Switch between the week and trailing chart.
    SwitchView,
}

/// Wait up to `timeout` for a key and map it to an action.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, PomotallyError> {
    if !event::poll(timeout)
        .map_err(|e| PomotallyError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| PomotallyError::Terminal(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    Ok(map_key(app, key.code))
}

fn map_key(app: &mut App, code: KeyCode) -> Option<Action> {
    // 's' is the only key that keeps a pending confirmation alive
    if code != KeyCode::Char('s') {
        app.cancel_pending();
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('c') => Some(Action::ToggleChart),
        KeyCode::Char('v') => Some(Action::SwitchView),
        KeyCode::Char('?') => {
            app.status = Some(App::HELP.to_string());
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn app() -> App {
        App::new(Rc::new(MemoryStore::new()), &Config::default()).unwrap()
    }

    #[test]
    fn test_key_mapping() {
        let mut app = app();
        assert_eq!(map_key(&mut app, KeyCode::Char(' ')), Some(Action::Toggle));
        assert_eq!(map_key(&mut app, KeyCode::Char('r')), Some(Action::Reset));
        assert_eq!(map_key(&mut app, KeyCode::Char('c')), Some(Action::ToggleChart));
        assert_eq!(map_key(&mut app, KeyCode::Char('v')), Some(Action::SwitchView));
        assert_eq!(map_key(&mut app, KeyCode::Esc), Some(Action::Quit));
        assert_eq!(map_key(&mut app, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_other_key_cancels_pending_skip() {
        let mut app = app();
        app.handle_skip();
        assert!(app.pending_skip);

        map_key(&mut app, KeyCode::Char('r'));
        assert!(!app.pending_skip);
    }

    #[test]
    fn test_skip_key_keeps_pending() {
        let mut app = app();
        app.handle_skip();

        assert_eq!(map_key(&mut app, KeyCode::Char('s')), Some(Action::Skip));
        assert!(app.pending_skip);
    }
}
