//! Per-table view preferences with durable key-value storage.

mod backend;
mod memory;
mod sqlite;

pub use backend::PrefsBackend;
pub use memory::MemoryPrefs;
pub use sqlite::SqlitePrefs;

use std::sync::Arc;

use log::warn;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::paths;
use crate::query::SortOrder;

/// Namespace prefix for preference keys.
const KEY_PREFIX: &str = "rxgrid.";

/// Preference storage error type.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persisted view settings for one logical table.
///
/// One record exists per `table_id` across the whole application. Fields
/// are individually optional: `None` means "never customized", so the grid
/// falls back to its defaults (all columns visible, default page size).
///
/// Serialized as JSON; unknown fields are ignored on load and missing ones
/// are defaulted, so records survive schema drift in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePreferences {
    /// Keys of the columns the user left visible.
    pub visible_columns: Option<Vec<String>>,
    /// Rows per page.
    pub page_size: Option<usize>,
    /// Sort column key.
    pub sort_field: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

/// A partial update to a [`TablePreferences`] record.
///
/// Fields left unset keep their previously saved value, which gives
/// [`PreferenceStore::save`] its merge semantics.
#[derive(Debug, Clone, Default)]
pub struct PreferencePatch {
    visible_columns: Option<Vec<String>>,
    page_size: Option<usize>,
    sort: Option<Option<(String, SortOrder)>>,
}

impl PreferencePatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visible column keys.
    pub fn visible_columns(mut self, keys: Vec<String>) -> Self {
        self.visible_columns = Some(keys);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the sort column and direction.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(Some((field.into(), order)));
        self
    }

    /// Remove any saved sort.
    pub fn clear_sort(mut self) -> Self {
        self.sort = Some(None);
        self
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.visible_columns.is_none() && self.page_size.is_none() && self.sort.is_none()
    }

    fn apply_to(&self, prefs: &mut TablePreferences) {
        if let Some(keys) = &self.visible_columns {
            prefs.visible_columns = Some(keys.clone());
        }
        if let Some(size) = self.page_size {
            prefs.page_size = Some(size);
        }
        match &self.sort {
            Some(Some((field, order))) => {
                prefs.sort_field = Some(field.clone());
                prefs.sort_order = Some(*order);
            }
            Some(None) => {
                prefs.sort_field = None;
                prefs.sort_order = None;
            }
            None => {}
        }
    }
}

/// Typed preference store.
///
/// Wraps a [`PrefsBackend`] with JSON serialization and the engine's
/// failure policy: loads that fail for any reason yield `None` (the grid
/// falls back to defaults), and saves are best-effort; failures are logged
/// and swallowed, never surfaced. Preferences are a convenience, not
/// correctness-critical state.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn PrefsBackend>,
}

impl PreferenceStore {
    /// Create a new preference store with the given backend.
    pub fn new(backend: impl PrefsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open a SQLite-backed store at the platform default location.
    pub async fn open_default() -> Result<Self, PrefsError> {
        let db = paths::preferences_db()
            .ok_or_else(|| std::io::Error::other("no data directory available"))?;
        if let Some(dir) = db.parent() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self::new(SqlitePrefs::new(db).await?))
    }

    fn key(table_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, table_id)
    }

    /// Load the preferences for a table.
    ///
    /// Returns `None` when nothing is stored, the storage is unavailable,
    /// or the record is corrupt; never an error.
    pub async fn load(&self, table_id: &str) -> Option<TablePreferences> {
        let bytes = match self.backend.get_bytes(&Self::key(table_id)).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!("preference load failed for '{}': {}", table_id, e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                warn!("corrupt preference record for '{}': {}", table_id, e);
                None
            }
        }
    }

    /// Merge a patch into the stored preferences for a table.
    ///
    /// Creates the record if absent. Best-effort: failures are logged and
    /// dropped.
    pub async fn save(&self, table_id: &str, patch: PreferencePatch) {
        if patch.is_empty() {
            return;
        }
        let mut prefs = self.load(table_id).await.unwrap_or_default();
        patch.apply_to(&mut prefs);

        let bytes = match serde_json::to_vec(&prefs) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("preference encode failed for '{}': {}", table_id, e);
                return;
            }
        };
        if let Err(e) = self.backend.set_bytes(&Self::key(table_id), bytes).await {
            warn!("preference save failed for '{}': {}", table_id, e);
        }
    }

    /// Delete the stored preferences for a table.
    pub async fn clear(&self, table_id: &str) {
        if let Err(e) = self.backend.delete(&Self::key(table_id)).await {
            warn!("preference clear failed for '{}': {}", table_id, e);
        }
    }

    /// List the table IDs that have stored preferences.
    pub async fn table_ids(&self) -> Vec<String> {
        match self.backend.keys_with_prefix(KEY_PREFIX).await {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_string))
                .collect(),
            Err(e) => {
                warn!("preference key scan failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = PreferenceStore::new(MemoryPrefs::new());
        store
            .save(
                "vendors",
                PreferencePatch::new()
                    .visible_columns(vec!["name".into(), "email".into()])
                    .page_size(25)
                    .sort("name", SortOrder::Ascend),
            )
            .await;

        let prefs = store.load("vendors").await.expect("stored record");
        assert_eq!(
            prefs.visible_columns,
            Some(vec!["name".to_string(), "email".to_string()])
        );
        assert_eq!(prefs.page_size, Some(25));
        assert_eq!(prefs.sort_field.as_deref(), Some("name"));
        assert_eq!(prefs.sort_order, Some(SortOrder::Ascend));
    }

    #[tokio::test]
    async fn partial_save_preserves_other_fields() {
        let store = PreferenceStore::new(MemoryPrefs::new());
        store
            .save("batches", PreferencePatch::new().page_size(50))
            .await;
        store
            .save(
                "batches",
                PreferencePatch::new().visible_columns(vec!["batch_no".into()]),
            )
            .await;

        let prefs = store.load("batches").await.expect("stored record");
        assert_eq!(prefs.page_size, Some(50));
        assert_eq!(prefs.visible_columns, Some(vec!["batch_no".to_string()]));
    }

    #[tokio::test]
    async fn tables_do_not_collide() {
        let store = PreferenceStore::new(MemoryPrefs::new());
        store
            .save("vendors", PreferencePatch::new().page_size(25))
            .await;
        store
            .save("invoices", PreferencePatch::new().page_size(100))
            .await;

        assert_eq!(store.load("vendors").await.unwrap().page_size, Some(25));
        assert_eq!(store.load("invoices").await.unwrap().page_size, Some(100));

        let mut ids = store.table_ids().await;
        ids.sort();
        assert_eq!(ids, vec!["invoices".to_string(), "vendors".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_record_loads_as_absent() {
        let backend = MemoryPrefs::new();
        backend
            .set_bytes("rxgrid.vendors", b"not json".to_vec())
            .await
            .unwrap();
        let store = PreferenceStore::new(backend);

        assert!(store.load("vendors").await.is_none());
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let backend = MemoryPrefs::new();
        backend
            .set_bytes(
                "rxgrid.vendors",
                br#"{"page_size": 25, "theme": "dark"}"#.to_vec(),
            )
            .await
            .unwrap();
        let store = PreferenceStore::new(backend);

        let prefs = store.load("vendors").await.expect("tolerant load");
        assert_eq!(prefs.page_size, Some(25));
        assert_eq!(prefs.visible_columns, None);
    }

    #[tokio::test]
    async fn clear_removes_record() {
        let store = PreferenceStore::new(MemoryPrefs::new());
        store
            .save("vendors", PreferencePatch::new().page_size(25))
            .await;
        store.clear("vendors").await;
        assert!(store.load("vendors").await.is_none());
    }
}
