//! Application state for the terminal widget.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::PomotallyError;
use crate::features::focus::SessionType;
use crate::features::history::{ChartView, DayEntry, WeekStart};
use crate::features::widget::{PomodoroWidget, SharedStore, StepReport};
use crate::tui::display::{Rendered, TerminalDisplay};

/// Upper bound on how long the loop waits for input between redraws.
const MAX_POLL: Duration = Duration::from_millis(250);

/// Application state.
pub struct App {
    widget: PomodoroWidget<TerminalDisplay>,
    /// Which chart is shown.
    pub view: ChartView,
    pub week_start: WeekStart,
    pub trailing_days: u32,
    /// Status message to display.
    pub status: Option<String>,
    /// Pending 's' key for skip confirmation.
    pub pending_skip: bool,
}

impl App {
    pub const HELP: &'static str =
        "space:start/pause | r:reset | s s:skip | c:chart | v:view | q:quit";

    /// Create the app over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer configuration is invalid.
    pub fn new(store: SharedStore, config: &Config) -> Result<Self, PomotallyError> {
        let (widget, warnings) = PomodoroWidget::new(TerminalDisplay::new(), store, &config.timer)?;

        Ok(Self {
            widget,
            view: config.history.view,
            week_start: config.history.week_start,
            trailing_days: config.history.trailing_days,
            status: Some(startup_status(&warnings)),
            pending_skip: false,
        })
    }

    /// The hosted widget.
    #[must_use]
    pub const fn widget(&self) -> &PomodoroWidget<TerminalDisplay> {
        &self.widget
    }

    /// What the engine rendered last.
    #[must_use]
    pub fn frame(&self) -> Option<Rendered> {
        self.widget.engine().display().last()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.widget.engine().is_running()
    }

    #[must_use]
    pub fn show_chart(&self) -> bool {
        self.widget.settings().show_chart
    }

    /// Entries for the selected chart view.
    #[must_use]
    pub fn series(&self) -> Vec<DayEntry> {
        match self.view {
            ChartView::Week => self.widget.week_series(self.week_start),
            ChartView::Trailing => self.widget.trailing_series(self.trailing_days),
        }
    }

    /// How long to wait for input before the next tick is due.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.widget
            .engine()
            .time_until_next_tick(now)
            .map_or(MAX_POLL, |d| d.min(MAX_POLL))
    }

    /// Apply whatever ticks are due.
    pub fn on_tick(&mut self, now: Instant) {
        let report = self.widget.poll(now);
        self.report(&report);
    }

    pub fn toggle(&mut self) {
        self.widget.toggle();
        self.status = Some(if self.is_running() { "Running" } else { "Paused" }.to_string());
    }

    pub fn reset(&mut self) {
        self.widget.reset();
        self.status = Some("Reset".to_string());
    }

    /// Handle 's': the first press asks, the second skips.
    pub fn handle_skip(&mut self) {
        if self.pending_skip {
            self.pending_skip = false;
            let report = self.widget.skip();
            self.report(&report);
        } else {
            self.pending_skip = true;
            self.status = Some("Press s again to skip this session".to_string());
        }
    }

    pub fn toggle_chart(&mut self) {
        self.status = Some(match self.widget.toggle_chart() {
            Ok(true) => "Chart shown".to_string(),
            Ok(false) => "Chart hidden".to_string(),
            Err(e) => format!("{e}"),
        });
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            ChartView::Week => ChartView::Trailing,
            ChartView::Trailing => ChartView::Week,
        };
        self.status = Some(match self.view {
            ChartView::Week => "This week".to_string(),
            ChartView::Trailing => format!("Last {} days", self.trailing_days),
        });
    }

    /// Cancel pending skip confirmation.
    pub fn cancel_pending(&mut self) {
        self.pending_skip = false;
        self.status = None;
    }

    fn report(&mut self, report: &StepReport) {
        let Some(transition) = &report.transition else {
            return;
        };

        if let Some(e) = report.persist_error() {
            self.status = Some(format!("{e} (today's count was not saved)"));
            return;
        }

        let next = match transition.to {
            SessionType::Work => "back to work",
            SessionType::ShortBreak => "take a short break",
            SessionType::LongBreak => "take a long break",
        };
        let today = report.recorded.as_ref().map(|r| r.count);
        self.status = Some(match today {
            Some(count) => format!("Pomodoro #{count} today, {next}"),
            None => format!("{} over, {next}", transition.finished_type()),
        });
    }
}

/// Status line after construction: every load warning, or the help hint.
fn startup_status(warnings: &[PomotallyError]) -> String {
    if warnings.is_empty() {
        return "Press ? for help".to_string();
    }

    let joined = warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{joined} (using defaults)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockPersistentStore};
    use std::rc::Rc;

    fn app() -> App {
        App::new(Rc::new(MemoryStore::new()), &Config::default()).unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let app = app();
        let frame = app.frame().unwrap();
        assert_eq!(frame.remaining_seconds, 25 * 60);
        assert_eq!(frame.session_type, SessionType::Work);
        assert!(!app.is_running());
    }

    #[test]
    fn test_skip_needs_confirmation() {
        let mut app = app();

        app.handle_skip();
        assert!(app.pending_skip);
        assert_eq!(app.frame().unwrap().session_type, SessionType::Work);

        app.handle_skip();
        assert!(!app.pending_skip);
        assert_eq!(app.frame().unwrap().session_type, SessionType::ShortBreak);
        assert_eq!(
            app.status.as_deref(),
            Some("Pomodoro #1 today, take a short break")
        );
        assert_eq!(app.widget().history().total(), 1);
    }

    #[test]
    fn test_toggle_updates_status() {
        let mut app = app();
        app.toggle();
        assert!(app.is_running());
        assert_eq!(app.status.as_deref(), Some("Running"));
        app.toggle();
        assert!(!app.is_running());
    }

    #[test]
    fn test_switch_view() {
        let mut app = app();
        assert_eq!(app.view, ChartView::Week);
        assert_eq!(app.series().len(), 7);

        app.trailing_days = 14;
        app.switch_view();
        assert_eq!(app.view, ChartView::Trailing);
        assert_eq!(app.series().len(), 14);
    }

    #[test]
    fn test_toggle_chart() {
        let mut app = app();
        assert!(!app.show_chart());
        app.toggle_chart();
        assert!(app.show_chart());
        assert_eq!(app.status.as_deref(), Some("Chart shown"));
    }

    #[test]
    fn test_poll_timeout_bounded() {
        let mut app = app();
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), MAX_POLL);

        app.toggle();
        assert!(app.poll_timeout(Instant::now()) <= MAX_POLL);
    }

    #[test]
    fn test_persist_failure_shown() {
        let mut store = MockPersistentStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(PomotallyError::Persistence("disk full".to_string())));

        let mut app = App::new(Rc::new(store), &Config::default()).unwrap();
        app.handle_skip();
        app.handle_skip();

        let status = app.status.clone().unwrap();
        assert!(status.contains("disk full"));
        assert_eq!(app.widget().history().total(), 1);
    }

    #[test]
    fn test_startup_status_lists_every_warning() {
        let warnings = [
            PomotallyError::Persistence("settings unreadable".to_string()),
            PomotallyError::Persistence("history unreadable".to_string()),
        ];

        let status = startup_status(&warnings);
        assert!(status.contains("settings unreadable"));
        assert!(status.contains("history unreadable"));
        assert_eq!(startup_status(&[]), "Press ? for help");
    }

    #[test]
    fn test_load_failures_reach_status() {
        let mut store = MockPersistentStore::new();
        store
            .expect_get()
            .returning(|key| Err(PomotallyError::Database(format!("{key} locked"))));

        let app = App::new(Rc::new(store), &Config::default()).unwrap();

        let status = app.status.unwrap();
        assert!(status.contains("pomodoroSettings locked"));
        assert!(status.contains("pomodoroHistory locked"));
    }
}
