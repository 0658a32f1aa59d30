//! Storage layer for pomotally.
//!
//! History and settings are persisted as JSON values behind a small
//! key-value interface. Two backends are provided:
//! - [`SqliteStore`]: a `SQLite` key-value table at `~/.pomotally/pomotally.db`
//! - [`MemoryStore`]: process-local, used in tests and when the database is unavailable

mod database;
mod kv;
mod memory;
mod migrations;

use std::rc::Rc;

use serde_json::Value;

use crate::error::PomotallyError;

pub use database::Database;
pub use kv::SqliteStore;
pub use memory::MemoryStore;

/// Key holding the date -> completion count mapping.
pub const HISTORY_KEY: &str = "pomodoroHistory";

/// Key holding the user settings.
pub const SETTINGS_KEY: &str = "pomodoroSettings";

/// A persistent key-value store of JSON values.
///
/// Absent keys are `Ok(None)`. Writes are synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait PersistentStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::Persistence` if the backend fails or the stored
    /// value is not valid JSON.
    fn get(&self, key: &str) -> Result<Option<Value>, PomotallyError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `PomotallyError::Persistence` if the write fails.
    fn set(&self, key: &str, value: &Value) -> Result<(), PomotallyError>;
}

impl<T: PersistentStore + ?Sized> PersistentStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<Value>, PomotallyError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), PomotallyError> {
        (**self).set(key, value)
    }
}

impl<T: PersistentStore + ?Sized> PersistentStore for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, PomotallyError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), PomotallyError> {
        (**self).set(key, value)
    }
}
