//! Selection state for bulk operations.
//!
//! Selection uses row IDs for stability across filtering and re-sorting.

use std::collections::HashSet;

/// ID-based selection state.
///
/// The grid controller scopes every operation to the post-filter,
/// pre-pagination row set: "select all" selects all matching rows, not just
/// the current page, and the controller resets the set whenever the source
/// data is replaced so a bulk action never targets rows that no longer
/// exist.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Toggle selection of an ID. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every ID in the given set.
    pub fn select_all(&mut self, all_ids: &[String]) {
        self.selected.extend(all_ids.iter().cloned());
    }

    /// Invert the selection within the given set: selected IDs become
    /// unselected and vice versa. IDs outside the set are dropped.
    pub fn invert(&mut self, all_ids: &[String]) {
        let inverted: HashSet<String> = all_ids
            .iter()
            .filter(|id| !self.selected.contains(*id))
            .cloned()
            .collect();
        self.selected = inverted;
    }
}
