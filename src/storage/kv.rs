//! `SQLite`-backed key-value store.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::{Database, PersistentStore};
use crate::error::PomotallyError;

/// Persists JSON values in the `kv_store` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Create a store over an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PersistentStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PomotallyError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| PomotallyError::Persistence(format!("Failed to read {key}: {e}")))?;

        raw.map(|text| {
            serde_json::from_str(&text)
                .map_err(|e| PomotallyError::Persistence(format!("Malformed value for {key}: {e}")))
        })
        .transpose()
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), PomotallyError> {
        let text = serde_json::to_string(value)?;

        self.db
            .connection()
            .execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, text, Utc::now().to_rfc3339()],
            )
            .map_err(|e| PomotallyError::Persistence(format!("Failed to write {key}: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_store() -> SqliteStore {
        SqliteStore::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_get_absent() {
        let store = create_test_store();
        assert!(store.get("pomodoroHistory").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let store = create_test_store();
        let value = json!({"2024-03-01": 3, "2024-03-02": 1});

        store.set("pomodoroHistory", &value).unwrap();
        assert_eq!(store.get("pomodoroHistory").unwrap(), Some(value));
    }

    #[test]
    fn test_set_overwrites() {
        let store = create_test_store();

        store.set("k", &json!(1)).unwrap();
        store.set("k", &json!(2)).unwrap();

        assert_eq!(store.get("k").unwrap(), Some(json!(2)));

        let rows: i64 = store
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_malformed_value_is_persistence_error() {
        let store = create_test_store();
        store
            .db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES ('bad', 'not json', 'x')",
                [],
            )
            .unwrap();

        let err = store.get("bad").unwrap_err();
        assert!(matches!(err, PomotallyError::Persistence(_)));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("store.db");

        {
            let store = SqliteStore::new(Database::open_at(&db_path).unwrap());
            store.set("pomodoroSettings", &json!({"workMinutes": 30})).unwrap();
        }

        let store = SqliteStore::new(Database::open_at(&db_path).unwrap());
        assert_eq!(
            store.get("pomodoroSettings").unwrap(),
            Some(json!({"workMinutes": 30}))
        );
    }
}
