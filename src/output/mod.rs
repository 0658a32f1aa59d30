//! Output formatting for pomotally.
//!
//! Formats history series and settings as colored text or JSON.

mod chart;
mod json;

use crate::cli::args::OutputFormat;
use crate::error::PomotallyError;
use crate::features::focus::Settings;
use crate::features::history::DayEntry;

pub use chart::{format_series_pretty, format_settings_pretty, render_bar_chart};
pub use json::{format_series_json, format_settings_json, to_json};

/// Format a history series based on output format.
///
/// # Errors
///
/// Returns `PomotallyError::Json` if JSON serialization fails.
pub fn format_series(
    entries: &[DayEntry],
    title: &str,
    format: OutputFormat,
) -> Result<String, PomotallyError> {
    match format {
        OutputFormat::Pretty => Ok(format_series_pretty(entries, title)),
        OutputFormat::Json => format_series_json(entries, title),
    }
}

/// Format settings based on output format.
///
/// # Errors
///
/// Returns `PomotallyError::Json` if JSON serialization fails.
pub fn format_settings(
    settings: &Settings,
    format: OutputFormat,
) -> Result<String, PomotallyError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => format_settings_json(settings),
    }
}
