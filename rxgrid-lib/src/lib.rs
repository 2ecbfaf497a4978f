//! Tabular data-management engine for ERP list screens
//!
//! `rxgrid-lib` is the shared core behind the list pages of a
//! pharmaceutical-distribution ERP: per-table view preferences, global and
//! per-column filtering, stable sorting, pagination, ID-based row selection,
//! and export of the current view to CSV, XLSX, JSON, PDF and print markup.
//!
//! The engine is generic over the row type and performs no I/O besides the
//! pluggable preference store. Callers supply columns, rows and callbacks;
//! the [`grid::GridController`] owns the view state machine.

pub mod export;
pub mod grid;
pub mod model;
pub mod paths;
pub mod prefs;
pub mod query;
pub mod selection;

pub use grid::{Actions, Callbacks, GridConfig, GridController, GridEvent, PagingMode, ViewState};
pub use model::{Column, GridRow, Money, Pinned, Value};
pub use prefs::{PreferencePatch, PreferenceStore, TablePreferences};
pub use query::{FilterState, PaginationState, SortOrder};
pub use selection::Selection;
