//! Explicit view-state machine for the grid.
//!
//! All user-visible transitions are expressed as [`GridEvent`]s applied by
//! [`ViewState::reduce`], so the state machine is testable without any
//! rendering or storage harness. The controller wraps this with the
//! collaborators (data, preference store, callbacks).

use crate::query::{FilterState, PaginationState, SortOrder};

/// A state transition of the grid view.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Set the global free-text filter.
    SetGlobalFilter(String),
    /// Set one column's filter text (empty text clears it).
    SetColumnFilter { key: String, text: String },
    /// Drop all filters.
    ClearFilters,
    /// Sort by a column.
    SetSort { field: String, order: SortOrder },
    /// Remove the sort.
    ClearSort,
    /// Move to a page and/or change the page size.
    ChangePage { page: usize, page_size: usize },
    /// Flip one column's visibility.
    ToggleColumn(String),
    /// Update the total row count behind the window.
    SetTotal(usize),
}

/// The grid's view state: filters, sort, pagination and column visibility.
///
/// `visible_columns` is a set of column keys; the rendered order is always
/// the mount order of the column definitions, so toggling a column back on
/// returns it to its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filters: FilterState,
    pub sort: Option<(String, SortOrder)>,
    pub pagination: PaginationState,
    pub visible_columns: Vec<String>,
}

impl ViewState {
    /// Initial state: no filters, no sort, page 1.
    pub fn new(page_size: usize, visible_columns: Vec<String>) -> Self {
        Self {
            filters: FilterState::new(),
            sort: None,
            pagination: PaginationState::new(page_size),
            visible_columns,
        }
    }

    /// Whether a column key is currently visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_columns.iter().any(|k| k == key)
    }

    /// Applies one event and returns the next state.
    ///
    /// Every filter change resets the page to 1; a narrowed result set
    /// must never strand the view on an out-of-range page. Column toggles
    /// deliberately leave filters and pagination untouched.
    pub fn reduce(mut self, event: GridEvent) -> Self {
        match event {
            GridEvent::SetGlobalFilter(text) => {
                self.filters.set_global(text);
                self.pagination.reset();
            }
            GridEvent::SetColumnFilter { key, text } => {
                self.filters.set_column(key, text);
                self.pagination.reset();
            }
            GridEvent::ClearFilters => {
                self.filters.clear();
                self.pagination.reset();
            }
            GridEvent::SetSort { field, order } => {
                self.sort = Some((field, order));
            }
            GridEvent::ClearSort => {
                self.sort = None;
            }
            GridEvent::ChangePage { page, page_size } => {
                self.pagination.set_page(page, page_size);
            }
            GridEvent::ToggleColumn(key) => {
                if let Some(pos) = self.visible_columns.iter().position(|k| *k == key) {
                    self.visible_columns.remove(pos);
                } else {
                    self.visible_columns.push(key);
                }
            }
            GridEvent::SetTotal(total) => {
                self.pagination.set_total(total);
            }
        }
        self
    }
}
