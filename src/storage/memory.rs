//! In-memory key-value store.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::PersistentStore;
use crate::error::PomotallyError;

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PomotallyError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), PomotallyError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("k", &json!({"a": 1})).unwrap();
        store.set("k", &json!({"a": 2})).unwrap();

        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 2})));
        assert_eq!(store.values.borrow().len(), 1);
    }
}
