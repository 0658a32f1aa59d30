//! Tick scheduling and duration parsing/formatting.

use std::time::{Duration, Instant};

use crate::error::PomotallyError;

/// Deadline-based periodic tick source.
///
/// The host loop polls [`Ticker::due_ticks`] with the current instant; there is
/// never more than one schedule armed at a time.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create an unarmed ticker. Periods shorter than a millisecond are raised
    /// to one millisecond.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Arm the schedule with the first tick one period after `now`.
    ///
    /// Returns false, leaving the existing schedule untouched, if already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    /// Disarm the schedule. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Whether a schedule is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume and count the ticks that fell due at or before `now`.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut count = 0u32;
        while due <= now {
            count = count.saturating_add(1);
            due += self.period;
        }
        self.next_due = Some(due);
        count
    }

    /// Time left until the next tick, if armed.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Format a number of seconds as MM:SS.
#[must_use]
pub fn format_duration_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a number of minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let plural = |n: u32| if n == 1 { "" } else { "s" };

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Parse a duration string like "25", "25m", "1h30m" into whole minutes.
///
/// A bare number is minutes.
///
/// # Errors
///
/// Returns `PomotallyError::InvalidConfiguration` for empty, non-numeric, zero,
/// or non-whole-minute input.
pub fn parse_minutes(s: &str) -> Result<u32, PomotallyError> {
    let invalid = || PomotallyError::InvalidConfiguration(format!("Invalid duration: '{s}'"));
    let input = s.trim().to_lowercase();

    if let Ok(minutes) = input.parse::<u32>() {
        return if minutes > 0 { Ok(minutes) } else { Err(invalid()) };
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }

        let num: u64 = current_num.parse().map_err(|_| invalid())?;
        current_num.clear();

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        total_seconds = num
            .checked_mul(unit)
            .and_then(|v| total_seconds.checked_add(v))
            .ok_or_else(invalid)?;
    }

    // Trailing number without unit is minutes
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().map_err(|_| invalid())?;
        total_seconds = num
            .checked_mul(60)
            .and_then(|v| total_seconds.checked_add(v))
            .ok_or_else(invalid)?;
    }

    if total_seconds == 0 || total_seconds % 60 != 0 {
        return Err(invalid());
    }

    u32::try_from(total_seconds / 60).map_err(|_| invalid())
}
