//! The Pomodoro widget: engine, history and settings behind one store.
//!
//! This is the application layer around [`SessionEngine`]. It forwards work
//! completions to [`HistoryStore`], keeps [`Settings`] persisted, and returns
//! persistence failures as values so a tick is never aborted by one.

use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::debug;

use super::focus::{
    DisplaySink, SessionEngine, SessionObserver, Settings, SettingsStore, Transition,
};
use super::history::{self, DayEntry, HistoryStore, Recorded, WeekStart};
use crate::config::TimerConfig;
use crate::error::PomotallyError;
use crate::storage::PersistentStore;

/// Shared handle to the persistent store.
pub type SharedStore = Rc<dyn PersistentStore>;

/// What happened during one engine step.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Set if a session completed.
    pub transition: Option<Transition>,
    /// Set if a work completion was recorded in history.
    pub recorded: Option<Recorded>,
    /// Whether the next session was started automatically.
    pub auto_started: bool,
}

impl StepReport {
    /// The persistence failure from recording, if any.
    #[must_use]
    pub fn persist_error(&self) -> Option<&PomotallyError> {
        self.recorded.as_ref().and_then(|r| r.persist_error.as_ref())
    }
}

/// A Pomodoro timer with persisted history and settings.
pub struct PomodoroWidget<D: DisplaySink> {
    engine: SessionEngine<D>,
    history: HistoryStore<SharedStore>,
    settings: SettingsStore<SharedStore>,
    auto_start_next: bool,
    clock: fn() -> NaiveDate,
}

impl<D: DisplaySink> PomodoroWidget<D> {
    /// Build a widget over `store`.
    ///
    /// Load failures do not prevent construction; they are returned so the
    /// host can tell the user that history or settings will not survive a
    /// restart.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` if the timer config has a
    /// zero tick interval.
    pub fn new(
        display: D,
        store: SharedStore,
        timer: &TimerConfig,
    ) -> Result<(Self, Vec<PomotallyError>), PomotallyError> {
        if timer.tick_interval_ms == 0 {
            return Err(PomotallyError::InvalidConfiguration(
                "tick interval must be positive".to_string(),
            ));
        }

        let (settings, settings_warning) = SettingsStore::load(Rc::clone(&store));
        let (history, history_warning) = HistoryStore::load(store);
        let engine = SessionEngine::with_tick_period(
            settings.current(),
            display,
            Duration::from_millis(timer.tick_interval_ms),
        )?;

        let warnings = [settings_warning, history_warning]
            .into_iter()
            .flatten()
            .collect();

        Ok((
            Self {
                engine,
                history,
                settings,
                auto_start_next: timer.auto_start_next,
                clock: history::today,
            },
            warnings,
        ))
    }

    /// Use `clock` as the source of the current date.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Register an engine observer.
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.engine.subscribe(observer);
    }

    /// Start the countdown.
    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    /// Pause the countdown.
    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    /// Start if paused, pause if running.
    pub fn toggle(&mut self) {
        if self.engine.is_running() {
            self.engine.pause();
        } else {
            self.engine.start();
        }
    }

    /// Restore the current session to its full length.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Complete the current session now.
    pub fn skip(&mut self) -> StepReport {
        let transition = self.engine.skip();
        self.after(Some(transition))
    }

    /// Apply one elapsed second.
    pub fn tick(&mut self) -> StepReport {
        let transition = self.engine.tick();
        self.after(transition)
    }

    /// Apply the ticks due at `now`.
    pub fn poll(&mut self, now: Instant) -> StepReport {
        let transition = self.engine.poll(now);
        self.after(transition)
    }

    /// Replace the settings, reconfigure the engine and persist.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` with nothing changed if
    /// `settings` is invalid. Returns `PomotallyError::Persistence` if the
    /// write fails; the new settings are in effect anyway.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), PomotallyError> {
        self.engine.configure(settings)?;
        self.settings.update(settings)
    }

    /// Flip chart visibility and persist it. Returns the new visibility.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::Persistence` if the write fails; the toggle is
    /// in effect anyway.
    pub fn toggle_chart(&mut self) -> Result<bool, PomotallyError> {
        let mut settings = self.settings.current();
        settings.show_chart = !settings.show_chart;
        self.update_settings(settings).map(|()| settings.show_chart)
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings.current()
    }

    /// The session engine.
    #[must_use]
    pub const fn engine(&self) -> &SessionEngine<D> {
        &self.engine
    }

    /// The history store.
    #[must_use]
    pub const fn history(&self) -> &HistoryStore<SharedStore> {
        &self.history
    }

    /// The current date according to the widget's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// The calendar week containing today.
    #[must_use]
    pub fn week_series(&self, week_start: WeekStart) -> Vec<DayEntry> {
        let today = self.today();
        self.history.week_series_at(today, week_start, today)
    }

    /// The `days` days ending today.
    #[must_use]
    pub fn trailing_series(&self, days: u32) -> Vec<DayEntry> {
        let today = self.today();
        self.history.trailing_series_at(today, days, today)
    }

    fn after(&mut self, transition: Option<Transition>) -> StepReport {
        let Some(transition) = transition else {
            return StepReport::default();
        };

        let today = self.today();
        let recorded = transition
            .is_work_completion()
            .then(|| self.history.record_completion(today));

        let auto_started = self.auto_start_next && self.engine.start();
        if auto_started {
            debug!("Auto-started {} session", transition.to);
        }

        StepReport {
            transition: Some(transition),
            recorded,
            auto_started,
        }
    }
}
