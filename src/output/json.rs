use serde::Serialize;
use serde_json::json;

use crate::error::PomotallyError;
use crate::features::focus::Settings;
use crate::features::history::{bar_heights, DayEntry};

/// Format a history series as JSON.
///
/// Each entry carries its bar height so consumers need not rescale.
///
/// # Errors
///
/// Returns `PomotallyError::Json` if JSON serialization fails.
pub fn format_series_json(entries: &[DayEntry], title: &str) -> Result<String, PomotallyError> {
    let days: Vec<_> = entries
        .iter()
        .zip(bar_heights(entries))
        .map(|(entry, height)| {
            json!({
                "date": entry.date,
                "weekday": entry.weekday_label(),
                "count": entry.count,
                "isToday": entry.is_today,
                "isFuture": entry.is_future,
                "barHeight": height,
            })
        })
        .collect();

    let output = json!({
        "title": title,
        "total": entries.iter().map(|e| u64::from(e.count)).sum::<u64>(),
        "days": days,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format settings as JSON.
///
/// # Errors
///
/// Returns `PomotallyError::Json` if JSON serialization fails.
pub fn format_settings_json(settings: &Settings) -> Result<String, PomotallyError> {
    to_json(settings)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomotallyError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomotallyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
