//! Focus session types and the per-session countdown.

use serde::{Deserialize, Serialize};

use super::timer::format_duration_mmss;

/// Type of session in the work/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Focused work interval
    Work,
    /// Rest after a work session
    ShortBreak,
    /// Rest after every fourth work session
    LongBreak,
}

impl SessionType {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One countdown interval.
///
/// `remaining_seconds` stays within `0..=duration_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session type
    pub session_type: SessionType,
    /// Configured length in seconds
    duration_seconds: u32,
    /// Seconds left on the clock
    remaining_seconds: u32,
}

impl Session {
    /// Create a full-length session.
    ///
    /// A zero duration is raised to one second so the session can still expire
    /// through a tick; callers validate durations before getting here.
    #[must_use]
    pub fn new(session_type: SessionType, duration_seconds: u32) -> Self {
        let duration_seconds = duration_seconds.max(1);
        Self {
            session_type,
            duration_seconds,
            remaining_seconds: duration_seconds,
        }
    }

    /// Count down one second.
    ///
    /// Returns true if the session just expired.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Drop the remaining time to zero.
    pub fn expire(&mut self) {
        self.remaining_seconds = 0;
    }

    /// Restore the full duration.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.duration_seconds;
    }

    /// Configured length in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Seconds left on the clock.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Seconds already counted down.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.duration_seconds - self.remaining_seconds
    }

    /// Whether the clock has reached zero.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Get progress as a fraction (0.0 - 1.0).
    ///
    /// Exactly 1.0 once expired.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.is_expired() {
            return 1.0;
        }
        (f64::from(self.elapsed_seconds()) / f64::from(self.duration_seconds)).clamp(0.0, 1.0)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_duration_mmss(self.remaining_seconds)
    }
}
