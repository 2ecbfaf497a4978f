//! Filter state and evaluation over in-memory rows.

use std::collections::HashMap;

use crate::model::Column;

/// The active filters for a grid: one free-text global filter plus
/// per-column substring filters.
///
/// Transient, in-memory state; filters are never persisted and reset to
/// empty on "clear filters". Matching is case-insensitive substring on the
/// value's display string (not regex, not tokenized), so it matches partial
/// codes and accidental whitespace exactly as typed.
///
/// # Example
///
/// ```
/// use rxgrid_lib::query::FilterState;
///
/// let mut filters = FilterState::new();
/// filters.set_global("amox");
/// filters.set_column("status", "active");
/// assert!(!filters.is_empty());
/// filters.clear();
/// assert!(filters.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    global: String,
    per_column: HashMap<String, String>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.per_column.is_empty()
    }

    /// The global free-text filter.
    pub fn global(&self) -> &str {
        &self.global
    }

    /// Set the global free-text filter. Empty text deactivates it.
    pub fn set_global(&mut self, text: impl Into<String>) {
        self.global = text.into();
    }

    /// The filter text for a column, if any.
    pub fn column(&self, key: &str) -> Option<&str> {
        self.per_column.get(key).map(String::as_str)
    }

    /// Set the filter text for a column. Empty text removes the entry.
    pub fn set_column(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        if text.is_empty() {
            self.per_column.remove(&key);
        } else {
            self.per_column.insert(key, text);
        }
    }

    /// All active per-column filters.
    pub fn columns(&self) -> &HashMap<String, String> {
        &self.per_column
    }

    /// Reset to no filters.
    pub fn clear(&mut self) {
        self.global.clear();
        self.per_column.clear();
    }
}

/// Applies the filter state to a row collection.
///
/// A row survives when:
/// 1. the global text (if any) case-insensitively appears in AT LEAST ONE
///    column's value, and
/// 2. EVERY active per-column filter appears in that column's value.
///
/// Per-column entries whose key matches no supplied column are ignored.
/// Null values stringify as the empty string and therefore only match an
/// empty needle. Input order is preserved.
pub fn apply<T: Clone>(rows: &[T], filters: &FilterState, columns: &[Column<T>]) -> Vec<T> {
    if filters.is_empty() {
        return rows.to_vec();
    }

    let global = filters.global().to_lowercase();
    let column_needles: Vec<(&Column<T>, String)> = filters
        .columns()
        .iter()
        .filter_map(|(key, text)| {
            let column = columns.iter().find(|c| c.key() == key)?;
            Some((column, text.to_lowercase()))
        })
        .collect();

    rows.iter()
        .filter(|row| {
            let global_hit = global.is_empty()
                || columns
                    .iter()
                    .any(|c| c.export_value(row).to_lowercase().contains(&global));

            global_hit
                && column_needles
                    .iter()
                    .all(|(c, needle)| c.export_value(row).to_lowercase().contains(needle))
        })
        .cloned()
        .collect()
}
