//! In-memory preference backend using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::{PrefsBackend, PrefsError};

/// An in-memory preference backend backed by a concurrent hash map.
///
/// Data is lost when the process exits. Useful as the injectable fake in
/// tests and for hosts that manage preference durability themselves.
///
/// # Example
///
/// ```
/// use rxgrid_lib::prefs::{MemoryPrefs, PreferenceStore};
///
/// let store = PreferenceStore::new(MemoryPrefs::new());
/// ```
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryPrefs {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl PrefsBackend for MemoryPrefs {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), PrefsError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), PrefsError> {
        self.store.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, PrefsError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
