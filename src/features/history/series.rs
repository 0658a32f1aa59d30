//! Chart series derived from daily counts.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// First day of the calendar week.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks run Sunday to Saturday.
    #[default]
    Sunday,
    /// Weeks run Monday to Sunday.
    Monday,
}

impl WeekStart {
    /// Days between the start of the week and `date`.
    #[must_use]
    pub fn offset_of(self, date: NaiveDate) -> u64 {
        let weekday = date.weekday();
        u64::from(match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        })
    }

    /// First day of the week containing `date`.
    #[must_use]
    pub fn first_day(self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_days(Days::new(self.offset_of(date)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Which series the chart shows.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    /// The calendar week containing the reference date.
    #[default]
    Week,
    /// The days ending at the reference date.
    Trailing,
}

/// One day of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// Calendar date.
    pub date: NaiveDate,
    /// Completed work sessions.
    pub count: u32,
    /// Whether this is the current date.
    pub is_today: bool,
    /// Whether this date is after the current date.
    pub is_future: bool,
}

impl DayEntry {
    fn new(counts: &BTreeMap<NaiveDate, u32>, date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
            is_today: date == today,
            is_future: date > today,
        }
    }

    /// Short weekday label, e.g. "Mon".
    #[must_use]
    pub fn weekday_label(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// Longest trailing series, one leap year of days.
pub const MAX_TRAILING_DAYS: u32 = 366;

/// The current local date.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Seven entries for the week containing `reference`, oldest first.
#[must_use]
pub fn week_series(
    counts: &BTreeMap<NaiveDate, u32>,
    reference: NaiveDate,
    week_start: WeekStart,
    today: NaiveDate,
) -> Vec<DayEntry> {
    week_start
        .first_day(reference)
        .iter_days()
        .take(7)
        .map(|date| DayEntry::new(counts, date, today))
        .collect()
}

/// `days` entries ending at `reference` inclusive, oldest first.
///
/// `days` is capped at [`MAX_TRAILING_DAYS`].
#[must_use]
pub fn trailing_series(
    counts: &BTreeMap<NaiveDate, u32>,
    reference: NaiveDate,
    days: u32,
    today: NaiveDate,
) -> Vec<DayEntry> {
    let days = days.min(MAX_TRAILING_DAYS);
    if days == 0 {
        return Vec::new();
    }

    let start = reference
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN);

    start
        .iter_days()
        .take_while(|date| *date <= reference)
        .map(|date| DayEntry::new(counts, date, today))
        .collect()
}

/// Bar height as a fraction of the tallest bar.
///
/// The divisor is at least one, so an all-zero series is flat.
#[must_use]
pub fn bar_height_fraction(count: u32, max_count: u32) -> f64 {
    f64::from(count) / f64::from(max_count.max(1))
}

/// Bar heights for a series.
#[must_use]
pub fn bar_heights(entries: &[DayEntry]) -> Vec<f64> {
    let max_count = entries.iter().map(|e| e.count).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| bar_height_fraction(e.count, max_count))
        .collect()
}
