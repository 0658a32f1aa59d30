//! The work/break session state machine.
//!
//! [`SessionEngine`] owns one active countdown and the cycle position. It is
//! driven by [`SessionEngine::tick`] (or [`SessionEngine::poll`] from a host
//! loop), renders through an injected [`DisplaySink`], and reports
//! completions to any subscribed [`SessionObserver`]s.
//!
//! Every transition leaves the engine stopped; starting the next session is
//! up to the caller.

use std::time::{Duration, Instant};

use log::{debug, info};

use super::session::{Session, SessionType};
use super::settings::Settings;
use super::timer::Ticker;
use crate::error::PomotallyError;

/// Number of work sessions per long break.
pub const WORK_SESSIONS_PER_LONG_BREAK: u32 = 4;

/// Nominal tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receives the countdown after every change.
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySink {
    /// Show the remaining time and progress fraction for the active session.
    fn render(&mut self, remaining_seconds: u32, progress: f64, session_type: SessionType);
}

/// Receives engine events. All methods default to no-ops.
#[cfg_attr(test, mockall::automock)]
pub trait SessionObserver {
    /// A tick was applied.
    fn on_tick(&mut self, _remaining_seconds: u32) {}

    /// A session finished, naturally or by skip.
    fn on_session_completed(&mut self, _session_type: SessionType) {}

    /// A work session finished. Fires once per completion, never for breaks.
    fn on_work_completed(&mut self) {}
}

/// State owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineState {
    /// Completed work sessions, driving the long-break cadence.
    pub completed_work: u32,
    /// Whether the countdown is running.
    pub running: bool,
    /// The active session.
    pub session: Session,
}

/// Outcome of a session completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The session that just finished, at zero remaining.
    pub finished: Session,
    /// Type of the session now active.
    pub to: SessionType,
    /// Completed work sessions after this transition.
    pub completed_work: u32,
}

impl Transition {
    /// Type of the session that finished.
    #[must_use]
    pub const fn finished_type(&self) -> SessionType {
        self.finished.session_type
    }

    /// Whether this transition completed a work session.
    #[must_use]
    pub const fn is_work_completion(&self) -> bool {
        matches!(self.finished.session_type, SessionType::Work)
    }
}

/// Next session type after `from` finishes, given the completed work count
/// including this completion.
#[must_use]
pub const fn next_session_type(from: SessionType, completed_work: u32) -> SessionType {
    match from {
        SessionType::Work if completed_work % WORK_SESSIONS_PER_LONG_BREAK == 0 => {
            SessionType::LongBreak
        }
        SessionType::Work => SessionType::ShortBreak,
        SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
    }
}

/// Countdown state machine for work/short-break/long-break cycling.
pub struct SessionEngine<D: DisplaySink> {
    state: EngineState,
    settings: Settings,
    ticker: Ticker,
    display: D,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<D: DisplaySink> SessionEngine<D> {
    /// Create an engine at the start of a work session.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` if `settings` is invalid.
    pub fn new(settings: Settings, display: D) -> Result<Self, PomotallyError> {
        Self::with_tick_period(settings, display, DEFAULT_TICK_PERIOD)
    }

    /// Create an engine with a custom tick period.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` if `settings` is invalid.
    pub fn with_tick_period(
        settings: Settings,
        display: D,
        period: Duration,
    ) -> Result<Self, PomotallyError> {
        settings.validate()?;

        let session = Session::new(
            SessionType::Work,
            settings.duration_seconds(SessionType::Work),
        );
        let mut engine = Self {
            state: EngineState {
                completed_work: 0,
                running: false,
                session,
            },
            settings,
            ticker: Ticker::new(period),
            display,
            observers: Vec::new(),
        };
        engine.render();
        Ok(engine)
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Start the countdown. No-op if already running.
    ///
    /// Returns true if the engine was started by this call.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Start the countdown with the tick schedule anchored at `now`.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        self.ticker.arm(now);
        debug!("Started {} session", self.state.session.session_type);
        true
    }

    /// Pause the countdown. No-op if not running.
    ///
    /// Returns true if the engine was paused by this call.
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.stop();
        debug!(
            "Paused {} session at {}",
            self.state.session.session_type,
            self.state.session.format_remaining()
        );
        true
    }

    /// Stop and restore the full duration of the current session.
    ///
    /// Session type and cycle position are unchanged.
    pub fn reset(&mut self) {
        self.stop();
        self.state.session.reset();
        self.render();
    }

    /// Complete the current session immediately.
    pub fn skip(&mut self) -> Transition {
        self.state.session.expire();
        self.render();
        self.complete()
    }

    /// Apply one elapsed second.
    ///
    /// Returns the transition if the session expired on this tick. Does
    /// nothing while stopped.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.state.running {
            return None;
        }

        let expired = self.state.session.tick();
        let remaining = self.state.session.remaining_seconds();
        for observer in &mut self.observers {
            observer.on_tick(remaining);
        }
        self.render();

        expired.then(|| self.complete())
    }

    /// Apply every tick the schedule has due at `now`.
    ///
    /// Stops at the first completion; ticks due after it are dropped since
    /// the schedule is cancelled by the transition.
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        let due = self.ticker.due_ticks(now);
        for _ in 0..due {
            if let Some(transition) = self.tick() {
                return Some(transition);
            }
        }
        None
    }

    /// Replace the configured durations.
    ///
    /// If the duration for the current session type changed, the session is
    /// re-initialized to the new length and the engine stops.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` and keeps the previous
    /// configuration if `settings` is invalid.
    pub fn configure(&mut self, settings: Settings) -> Result<(), PomotallyError> {
        settings.validate()?;

        let current = self.state.session.session_type;
        let changed = settings.duration_seconds(current) != self.settings.duration_seconds(current);
        self.settings = settings;

        if changed {
            self.stop();
            self.state.session = Session::new(current, settings.duration_seconds(current));
            info!(
                "{current} session re-initialized to {}",
                self.state.session.format_remaining()
            );
            self.render();
        }

        Ok(())
    }

    /// Engine state.
    #[must_use]
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    /// Active session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.state.session
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Progress fraction of the active session.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.state.session.progress()
    }

    /// Time until the next scheduled tick, if running.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    /// The display sink.
    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    fn stop(&mut self) {
        self.state.running = false;
        self.ticker.cancel();
    }

    fn render(&mut self) {
        let session = &self.state.session;
        self.display.render(
            session.remaining_seconds(),
            session.progress(),
            session.session_type,
        );
    }

    fn complete(&mut self) -> Transition {
        let finished = self.state.session;
        let from = finished.session_type;

        if from == SessionType::Work {
            self.state.completed_work = self.state.completed_work.saturating_add(1);
        }
        let to = next_session_type(from, self.state.completed_work);

        for observer in &mut self.observers {
            observer.on_session_completed(from);
            if from == SessionType::Work {
                observer.on_work_completed();
            }
        }

        self.stop();
        self.state.session = Session::new(to, self.settings.duration_seconds(to));
        self.render();

        info!(
            "{from} session completed, next is {to} ({} work sessions done)",
            self.state.completed_work
        );

        Transition {
            finished,
            to,
            completed_work: self.state.completed_work,
        }
    }
}
