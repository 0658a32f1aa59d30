//! User settings: session durations and chart visibility.
//!
//! Persisted under [`SETTINGS_KEY`] in the persistent store.

use log::warn;
use serde::{Deserialize, Serialize};

use super::session::SessionType;
use crate::error::PomotallyError;
use crate::storage::{PersistentStore, SETTINGS_KEY};

/// Session durations and display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Work session length in minutes.
    pub work_minutes: u32,
    /// Short break length in minutes.
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    pub long_break_minutes: u32,
    /// Whether the history chart is shown.
    pub show_chart: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            show_chart: false,
        }
    }
}

impl Settings {
    /// Check that every duration is positive and fits in seconds.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` naming the first bad field.
    pub fn validate(&self) -> Result<(), PomotallyError> {
        let fields = [
            ("work minutes", self.work_minutes),
            ("short break minutes", self.short_break_minutes),
            ("long break minutes", self.long_break_minutes),
        ];

        for (name, minutes) in fields {
            if minutes == 0 {
                return Err(PomotallyError::InvalidConfiguration(format!(
                    "{name} must be positive"
                )));
            }
            if minutes.checked_mul(60).is_none() {
                return Err(PomotallyError::InvalidConfiguration(format!(
                    "{name} is too large: {minutes}"
                )));
            }
        }

        Ok(())
    }

    /// Configured minutes for a session type.
    #[must_use]
    pub const fn minutes_for(&self, session_type: SessionType) -> u32 {
        match session_type {
            SessionType::Work => self.work_minutes,
            SessionType::ShortBreak => self.short_break_minutes,
            SessionType::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured seconds for a session type.
    #[must_use]
    pub const fn duration_seconds(&self, session_type: SessionType) -> u32 {
        self.minutes_for(session_type).saturating_mul(60)
    }
}

/// Loads and saves [`Settings`] through a [`PersistentStore`].
///
/// The in-memory copy is authoritative; a failed write keeps it and reports
/// the failure.
pub struct SettingsStore<S> {
    store: S,
    current: Settings,
}

impl<S: PersistentStore> SettingsStore<S> {
    /// Load settings from `store`.
    ///
    /// Absent settings yield the defaults. Unreadable, malformed or invalid
    /// settings also yield the defaults, with the failure returned alongside.
    pub fn load(store: S) -> (Self, Option<PomotallyError>) {
        let (current, warning) = match read_settings(&store) {
            Ok(settings) => (settings.unwrap_or_default(), None),
            Err(e) => {
                warn!("Falling back to default settings: {e}");
                (Settings::default(), Some(e))
            }
        };

        (Self { store, current }, warning)
    }

    /// Current settings.
    #[must_use]
    pub const fn current(&self) -> Settings {
        self.current
    }

    /// Replace the settings and persist them.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::InvalidConfiguration` without changing
    /// anything if `settings` is invalid. Returns `PomotallyError::Persistence`
    /// if the write fails; the new settings are still applied in memory.
    pub fn update(&mut self, settings: Settings) -> Result<(), PomotallyError> {
        settings.validate()?;
        self.current = settings;

        let value = serde_json::to_value(settings)?;
        self.store.set(SETTINGS_KEY, &value).inspect_err(|e| {
            warn!("Failed to persist settings: {e}");
        })
    }
}

fn read_settings<S: PersistentStore>(store: &S) -> Result<Option<Settings>, PomotallyError> {
    let Some(value) = store.get(SETTINGS_KEY)? else {
        return Ok(None);
    };

    let settings: Settings = serde_json::from_value(value)
        .map_err(|e| PomotallyError::Persistence(format!("Malformed settings: {e}")))?;
    settings
        .validate()
        .map_err(|e| PomotallyError::Persistence(format!("Stored settings rejected: {e}")))?;

    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockPersistentStore};
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.short_break_minutes, 5);
        assert_eq!(settings.long_break_minutes, 15);
        assert!(!settings.show_chart);
        assert_eq!(settings.duration_seconds(SessionType::Work), 1500);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let settings = Settings {
            short_break_minutes: 0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("short break minutes"));
    }

    #[test]
    fn test_validate_rejects_overflow() {
        let settings = Settings {
            work_minutes: u32::MAX,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_absent_uses_defaults() {
        let (store, warning) = SettingsStore::load(MemoryStore::new());
        assert!(warning.is_none());
        assert_eq!(store.current(), Settings::default());
    }

    #[test]
    fn test_load_partial_json_fills_defaults() {
        let memory = MemoryStore::new();
        memory
            .set(SETTINGS_KEY, &json!({"workMinutes": 50, "showChart": true}))
            .unwrap();

        let (store, warning) = SettingsStore::load(&memory);
        assert!(warning.is_none());
        assert_eq!(store.current().work_minutes, 50);
        assert_eq!(store.current().short_break_minutes, 5);
        assert!(store.current().show_chart);
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let memory = MemoryStore::new();
        memory
            .set(SETTINGS_KEY, &json!({"workMinutes": "twenty"}))
            .unwrap();

        let (store, warning) = SettingsStore::load(&memory);
        assert!(matches!(warning, Some(PomotallyError::Persistence(_))));
        assert_eq!(store.current(), Settings::default());
    }

    #[test]
    fn test_load_invalid_values_fall_back() {
        let memory = MemoryStore::new();
        memory.set(SETTINGS_KEY, &json!({"workMinutes": 0})).unwrap();

        let (store, warning) = SettingsStore::load(&memory);
        assert!(warning.is_some());
        assert_eq!(store.current(), Settings::default());
    }

    #[test]
    fn test_update_persists() {
        let memory = MemoryStore::new();
        let (mut store, _) = SettingsStore::load(&memory);

        let settings = Settings {
            work_minutes: 45,
            ..Settings::default()
        };
        store.update(settings).unwrap();

        let (reloaded, _) = SettingsStore::load(&memory);
        assert_eq!(reloaded.current().work_minutes, 45);
    }

    #[test]
    fn test_update_invalid_keeps_previous() {
        let (mut store, _) = SettingsStore::load(MemoryStore::new());

        let err = store
            .update(Settings {
                work_minutes: 0,
                ..Settings::default()
            })
            .unwrap_err();

        assert!(matches!(err, PomotallyError::InvalidConfiguration(_)));
        assert_eq!(store.current(), Settings::default());
    }

    #[test]
    fn test_update_persist_failure_keeps_in_memory() {
        let mut mock = MockPersistentStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set()
            .times(1)
            .returning(|_, _| Err(PomotallyError::Persistence("quota exceeded".into())));

        let (mut store, _) = SettingsStore::load(mock);
        let settings = Settings {
            long_break_minutes: 20,
            ..Settings::default()
        };

        let err = store.update(settings).unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(store.current().long_break_minutes, 20);
    }

    #[test]
    fn test_load_store_failure_falls_back() {
        let mut mock = MockPersistentStore::new();
        mock.expect_get()
            .returning(|_| Err(PomotallyError::Persistence("locked".into())));

        let (store, warning) = SettingsStore::load(mock);
        assert!(warning.is_some());
        assert_eq!(store.current(), Settings::default());
    }
}
