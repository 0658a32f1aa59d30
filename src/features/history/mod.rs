//! Completed work session history.
//!
//! Keeps a per-day count of completed work sessions and derives the
//! chart series shown by the widget:
//! - the calendar week containing a date
//! - the trailing N days ending at a date

mod series;
mod store;

pub use series::{
    bar_height_fraction, bar_heights, today, trailing_series, week_series, ChartView, DayEntry,
    WeekStart, MAX_TRAILING_DAYS,
};
pub use store::{HistoryStore, Recorded};
