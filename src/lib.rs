//! pomotally - a Pomodoro timer with a persisted daily history.
//!
//! The core is [`features::focus::SessionEngine`], a countdown state machine
//! cycling work and break sessions, and [`features::history::HistoryStore`],
//! which counts completed work sessions per day and derives chart series.
//! [`features::widget::PomodoroWidget`] composes the two over a
//! [`storage::PersistentStore`].

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomotallyError;
pub use features::widget::PomodoroWidget;
