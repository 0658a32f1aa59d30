//! Pomodoro sessions and the session engine.
//!
//! Provides the work/break countdown cycle:
//! - Work, short break and long break sessions
//! - Start/pause/reset/skip with a one-second tick
//! - A long break after every fourth work session
//! - User settings for session lengths

pub mod engine;
pub mod session;
pub mod settings;
pub mod timer;

pub use engine::{
    next_session_type, DisplaySink, EngineState, SessionEngine, SessionObserver, Transition,
    DEFAULT_TICK_PERIOD, WORK_SESSIONS_PER_LONG_BREAK,
};
pub use session::{Session, SessionType};
pub use settings::{Settings, SettingsStore};
pub use timer::{format_duration_mmss, format_minutes, parse_minutes, Ticker};
