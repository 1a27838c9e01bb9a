//! Key-value storage abstraction
//!
//! The browser build backs this with `localStorage`; tests and native tools
//! use [`MemoryStorage`].

use crate::error::CoreResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Per-origin persistent string storage
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&self, key: &str);
}

/// In-memory storage; clones share the same entries
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set("theme", "dark").unwrap();
        assert_eq!(handle.get("theme").as_deref(), Some("dark"));

        handle.remove("theme");
        assert!(storage.get("theme").is_none());
        assert!(storage.is_empty());
    }
}
