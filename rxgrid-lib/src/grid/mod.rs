//! Grid controller: the root of the engine.

mod callbacks;
mod config;
mod state;

pub use callbacks::{Actions, ActionHandler, BulkHandler, Callbacks, PageHandler, RowHandler};
pub use config::{GridConfig, PagingMode};
pub use state::{GridEvent, ViewState};

use crate::export::{
    self, ExportArtifact, ExportError, ExportFormat, ExportTask, PdfOptions, export_file_name,
};
use crate::model::{Column, GridRow};
use crate::prefs::{PreferencePatch, PreferenceStore};
use crate::query::{self, SortOrder};
use crate::selection::Selection;

/// The engine behind one mounted list screen.
///
/// Owns the view state machine and composes the preference store, filter
/// engine, selection set and export engine over one row collection. One
/// instance lives for the lifetime of the mounted view; concurrently open
/// tables share nothing but the keyed preference store.
///
/// All mutation goes through `&mut self` from the host's event loop; the
/// engine holds no interior locks.
pub struct GridController<T: GridRow> {
    table_id: String,
    export_name: String,
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    state: ViewState,
    selection: Selection,
    mode: PagingMode,
    callbacks: Callbacks<T>,
    prefs: PreferenceStore,
}

impl<T: GridRow> GridController<T> {
    /// Mounts a grid: loads preferences (or defaults to all columns
    /// visible and the configured page size), with empty filters, page 1
    /// and an empty selection.
    ///
    /// Preference keys from a stale column schema are dropped silently.
    pub async fn mount(config: GridConfig<T>, prefs: PreferenceStore) -> Self {
        let loaded = prefs.load(&config.table_id).await;
        let all_keys: Vec<String> = config.columns.iter().map(|c| c.key().to_string()).collect();

        let visible = match loaded.as_ref().and_then(|p| p.visible_columns.clone()) {
            Some(saved) => saved
                .into_iter()
                .filter(|key| all_keys.contains(key))
                .collect(),
            None => all_keys.clone(),
        };
        let page_size = loaded
            .as_ref()
            .and_then(|p| p.page_size)
            .unwrap_or(config.default_page_size);
        let sort = loaded.as_ref().and_then(|p| match (&p.sort_field, p.sort_order) {
            (Some(field), Some(order)) if all_keys.contains(field) => {
                Some((field.clone(), order))
            }
            _ => None,
        });

        let mut state = ViewState::new(page_size, visible);
        state.sort = sort;

        let mut controller = Self {
            table_id: config.table_id,
            export_name: config.export_name,
            columns: config.columns,
            rows: config.rows,
            state,
            selection: Selection::new(),
            mode: config.paging,
            callbacks: config.callbacks,
            prefs,
        };
        controller.sync_total();
        controller
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// The table identifier the preferences are keyed by.
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// The current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// All mounted column definitions.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// The paging mode.
    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    /// The visible-column projection, in mount order.
    pub fn effective_columns(&self) -> Vec<Column<T>> {
        self.columns
            .iter()
            .filter(|c| self.state.is_visible(c.key()))
            .cloned()
            .collect()
    }

    /// The post-filter, post-sort row set (client mode), or the supplied
    /// rows untouched (server mode pass-through).
    pub fn filtered_rows(&self) -> Vec<T> {
        match self.mode {
            PagingMode::Server { .. } => self.rows.clone(),
            PagingMode::Client => {
                let mut rows = query::apply(&self.rows, &self.state.filters, &self.columns);
                if let Some((field, order)) = &self.state.sort {
                    query::sort_rows(&mut rows, field, *order, &self.columns);
                }
                rows
            }
        }
    }

    /// The rows of the current page.
    pub fn visible_rows(&self) -> Vec<T> {
        match self.mode {
            PagingMode::Server { .. } => self.rows.clone(),
            PagingMode::Client => {
                let filtered = self.filtered_rows();
                self.state.pagination.slice(&filtered).to_vec()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn dispatch(&mut self, event: GridEvent) {
        self.state = self.state.clone().reduce(event);
    }

    fn sync_total(&mut self) {
        let total = match self.mode {
            PagingMode::Client => self.filtered_rows().len(),
            PagingMode::Server { total } => total,
        };
        self.dispatch(GridEvent::SetTotal(total));
    }

    /// Replace the row collection (e.g. after a refetch).
    ///
    /// The selection is cleared; it must not survive into a collection
    /// where its rows may no longer exist; and the page is clamped into
    /// the new range.
    pub fn set_data(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.selection.clear();
        self.sync_total();
    }

    /// Set the global free-text filter. Resets to page 1.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.dispatch(GridEvent::SetGlobalFilter(text.into()));
        self.sync_total();
    }

    /// Set one column's filter text. Resets to page 1.
    pub fn set_column_filter(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.dispatch(GridEvent::SetColumnFilter {
            key: key.into(),
            text: text.into(),
        });
        self.sync_total();
    }

    /// Drop all filters. Resets to page 1.
    pub fn clear_filters(&mut self) {
        self.dispatch(GridEvent::ClearFilters);
        self.sync_total();
    }

    /// Sort by a column and persist the choice.
    pub async fn set_sort(&mut self, field: impl Into<String>, order: SortOrder) {
        let field = field.into();
        self.dispatch(GridEvent::SetSort {
            field: field.clone(),
            order,
        });
        self.prefs
            .save(&self.table_id, PreferencePatch::new().sort(field, order))
            .await;
    }

    /// Remove the sort and persist the removal.
    pub async fn clear_sort(&mut self) {
        self.dispatch(GridEvent::ClearSort);
        self.prefs
            .save(&self.table_id, PreferencePatch::new().clear_sort())
            .await;
    }

    /// Move to a page and/or change the page size.
    ///
    /// In server mode the change is forwarded through `on_page_change`; the
    /// caller refetches and supplies the new rows and total. A changed page
    /// size is persisted.
    pub async fn change_page(&mut self, page: usize, page_size: usize) {
        let size_changed = page_size.max(1) != self.state.pagination.page_size();
        self.dispatch(GridEvent::ChangePage { page, page_size });

        if matches!(self.mode, PagingMode::Server { .. })
            && let Some(cb) = &self.callbacks.on_page_change
        {
            cb(self.state.pagination.page(), self.state.pagination.page_size());
        }

        if size_changed {
            self.prefs
                .save(
                    &self.table_id,
                    PreferencePatch::new().page_size(self.state.pagination.page_size()),
                )
                .await;
        }
    }

    /// Update the caller-supplied total (server mode only).
    pub fn set_total(&mut self, total: usize) {
        if let PagingMode::Server { total: t } = &mut self.mode {
            *t = total;
            self.dispatch(GridEvent::SetTotal(total));
        }
    }

    /// Flip one column's visibility and persist the visible set.
    ///
    /// Filters and pagination are left untouched.
    pub async fn toggle_column(&mut self, key: &str) {
        self.dispatch(GridEvent::ToggleColumn(key.to_string()));
        self.prefs
            .save(
                &self.table_id,
                PreferencePatch::new().visible_columns(self.state.visible_columns.clone()),
            )
            .await;
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn filtered_ids(&self) -> Vec<String> {
        self.filtered_rows().iter().map(|row| row.id()).collect()
    }

    /// Toggle one row. Returns `true` if it is now selected.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Select every row matching the current filters; all pages, not just
    /// the visible one. In server mode this is scoped to the currently
    /// loaded row set; the engine cannot enumerate rows it never received.
    pub fn select_all(&mut self) {
        let ids = self.filtered_ids();
        self.selection.select_all(&ids);
    }

    /// Invert the selection within the current filtered row set.
    pub fn invert_selection(&mut self) {
        let ids = self.filtered_ids();
        self.selection.invert(&ids);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selected rows resolved to full row objects, in filtered order.
    ///
    /// Rows whose IDs were selected but have since been filtered out are
    /// excluded; bulk operations only ever see rows the user can see.
    pub fn selected_rows(&self) -> Vec<T> {
        self.filtered_rows()
            .into_iter()
            .filter(|row| self.selection.is_selected(&row.id()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Business actions (pure pass-through)
    // -------------------------------------------------------------------------

    /// Which actions the wired callbacks unlock.
    pub fn actions(&self) -> Actions {
        self.callbacks.available()
    }

    /// Notify the caller to open its "add record" flow.
    pub fn add_record(&self) {
        if let Some(cb) = &self.callbacks.on_add {
            cb();
        }
    }

    /// Notify the caller to open its edit flow for a row.
    pub fn edit_record(&self, row: &T) {
        if let Some(cb) = &self.callbacks.on_edit {
            cb(row);
        }
    }

    /// Notify the caller to open its read-only view for a row.
    pub fn view_record(&self, row: &T) {
        if let Some(cb) = &self.callbacks.on_view {
            cb(row);
        }
    }

    /// Notify the caller to delete a row. The engine does not mutate its
    /// own collection; the caller refetches on success.
    pub fn delete_record(&self, row: &T) {
        if let Some(cb) = &self.callbacks.on_delete {
            cb(row);
        }
    }

    /// Resolve the selection to row objects and hand them to the bulk
    /// delete callback. Returns how many rows were passed.
    pub fn bulk_delete(&self) -> usize {
        let Some(cb) = &self.callbacks.on_bulk_delete else {
            return 0;
        };
        let rows = self.selected_rows();
        if rows.is_empty() {
            return 0;
        }
        let count = rows.len();
        cb(rows);
        count
    }

    /// Ask the caller to refetch.
    pub fn refresh(&self) {
        if let Some(cb) = &self.callbacks.on_refresh {
            cb();
        }
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    fn artifact(
        &self,
        bytes: Vec<u8>,
        format: ExportFormat,
        row_count: usize,
    ) -> ExportArtifact {
        ExportArtifact {
            bytes,
            file_name: export_file_name(&self.export_name, format),
            mime_type: format.mime_type(),
            row_count,
        }
    }

    /// Export the current view as CSV.
    pub fn export_csv(&self) -> Result<ExportArtifact, ExportError> {
        let rows = self.filtered_rows();
        let columns = self.effective_columns();
        let bytes = export::to_csv(&rows, &columns)?;
        Ok(self.artifact(bytes, ExportFormat::Csv, rows.len()))
    }

    /// Export the current view as an XLSX workbook.
    pub fn export_xlsx(&self) -> Result<ExportArtifact, ExportError> {
        let rows = self.filtered_rows();
        let columns = self.effective_columns();
        let bytes = export::to_xlsx(&rows, &columns)?;
        Ok(self.artifact(bytes, ExportFormat::Xlsx, rows.len()))
    }

    /// Export the current view as a JSON array.
    pub fn export_json(&self) -> Result<ExportArtifact, ExportError> {
        let rows = self.filtered_rows();
        let columns = self.effective_columns();
        let bytes = export::to_json(&rows, &columns)?;
        Ok(self.artifact(bytes, ExportFormat::Json, rows.len()))
    }

    /// Export the current view (or just the selection) as a paginated PDF.
    pub fn export_pdf(
        &self,
        options: PdfOptions,
        selection_only: bool,
    ) -> Result<ExportArtifact, ExportError> {
        let rows = if selection_only {
            self.selected_rows()
        } else {
            self.filtered_rows()
        };
        let columns = self.effective_columns();
        let bytes = export::to_pdf(&rows, &columns, &options)?;
        Ok(self.artifact(bytes, ExportFormat::Pdf, rows.len()))
    }

    /// Render the current view as print markup for the host's print dialog.
    pub fn print_markup(&self, title: &str, subtitle: Option<&str>) -> String {
        export::to_print_markup(&self.filtered_rows(), &self.effective_columns(), title, subtitle)
    }

    /// Generate the paginated PDF on a background worker.
    ///
    /// The returned task can be cancelled (user navigates away); the
    /// in-progress buffer is discarded with no side effects.
    pub fn spawn_pdf_export(&self, options: PdfOptions, selection_only: bool) -> ExportTask {
        let rows = if selection_only {
            self.selected_rows()
        } else {
            self.filtered_rows()
        };
        let columns = self.effective_columns();
        let file_name = export_file_name(&self.export_name, ExportFormat::Pdf);

        ExportTask::spawn(move |cancel| {
            let row_count = rows.len();
            let bytes = export::to_pdf_with_cancel(&rows, &columns, &options, cancel)?;
            Ok(ExportArtifact {
                bytes,
                file_name,
                mime_type: ExportFormat::Pdf.mime_type(),
                row_count,
            })
        })
    }
}
