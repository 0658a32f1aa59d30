//! Settings command implementation.

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::PomotallyError;
use crate::features::focus::{parse_minutes, Settings, SettingsStore};
use crate::features::widget::SharedStore;
use crate::output::format_settings;

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error if stored settings cannot be read, a value is invalid,
/// or the new settings cannot be persisted.
pub fn settings(
    store: SharedStore,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, PomotallyError> {
    let (mut settings_store, warning) = SettingsStore::load(store);

    match cmd {
        SettingsCommands::Show => {
            if let Some(e) = warning {
                return Err(e);
            }
            format_settings(&settings_store.current(), format)
        }
        SettingsCommands::Set {
            work,
            short,
            long,
            show_chart,
        } => {
            let current = settings_store.current();
            let updated = Settings {
                work_minutes: parse_or(work.as_deref(), current.work_minutes)?,
                short_break_minutes: parse_or(short.as_deref(), current.short_break_minutes)?,
                long_break_minutes: parse_or(long.as_deref(), current.long_break_minutes)?,
                show_chart: show_chart.unwrap_or(current.show_chart),
            };

            settings_store.update(updated)?;
            format_settings(&settings_store.current(), format)
        }
    }
}

fn parse_or(value: Option<&str>, current: u32) -> Result<u32, PomotallyError> {
    value.map_or(Ok(current), parse_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::Value;
    use std::rc::Rc;

    fn set(work: Option<&str>, show_chart: Option<bool>) -> SettingsCommands {
        SettingsCommands::Set {
            work: work.map(str::to_string),
            short: None,
            long: None,
            show_chart,
        }
    }

    #[test]
    fn test_show_defaults() {
        let output = settings(
            Rc::new(MemoryStore::new()),
            SettingsCommands::Show,
            OutputFormat::Json,
        )
        .unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["workMinutes"], 25);
    }

    #[test]
    fn test_set_then_show() {
        let store: SharedStore = Rc::new(MemoryStore::new());

        settings(Rc::clone(&store), set(Some("1h"), Some(true)), OutputFormat::Json).unwrap();
        let output = settings(store, SettingsCommands::Show, OutputFormat::Json).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["workMinutes"], 60);
        assert_eq!(parsed["shortBreakMinutes"], 5);
        assert_eq!(parsed["showChart"], true);
    }

    #[test]
    fn test_set_invalid_duration() {
        let store: SharedStore = Rc::new(MemoryStore::new());

        let err = settings(Rc::clone(&store), set(Some("soon"), None), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, PomotallyError::InvalidConfiguration(_)));

        // Nothing was written
        let output = settings(store, SettingsCommands::Show, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["workMinutes"], 25);
    }
}
