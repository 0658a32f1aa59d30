//! History command implementation.

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::config::HistoryConfig;
use crate::error::PomotallyError;
use crate::features::history::{self, HistoryStore, MAX_TRAILING_DAYS};
use crate::features::widget::SharedStore;
use crate::output::format_series;

/// Print the history series for the requested period.
///
/// # Errors
///
/// Returns an error if the stored history cannot be read or output
/// formatting fails.
pub fn history(
    store: SharedStore,
    args: &HistoryArgs,
    defaults: &HistoryConfig,
    format: OutputFormat,
) -> Result<String, PomotallyError> {
    let (tally, warning) = HistoryStore::load(store);
    if let Some(e) = warning {
        return Err(e);
    }

    let today = history::today();
    let reference = args.date.unwrap_or(today);

    let (entries, title) = match args.trailing {
        Some(days) if days == 0 || days > MAX_TRAILING_DAYS => {
            return Err(PomotallyError::Parse(format!(
                "--trailing must be between 1 and {MAX_TRAILING_DAYS}"
            )))
        }
        Some(days) => (
            tally.trailing_series_at(reference, days, today),
            format!("Last {days} days to {reference}"),
        ),
        None => {
            let week_start = args.week_start.unwrap_or(defaults.week_start);
            let entries = tally.week_series_at(reference, week_start, today);
            let title = entries.first().map_or_else(
                || "Week".to_string(),
                |first| format!("Week of {}", first.date),
            );
            (entries, title)
        }
    };

    format_series(&entries, &title, format)
}
