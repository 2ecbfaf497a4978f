//! Mount-time configuration for a grid.

use crate::model::Column;
use crate::query::DEFAULT_PAGE_SIZE;

use super::Callbacks;

/// Where pagination is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// The engine filters, sorts and slices its in-memory collection.
    Client,
    /// Rows arrive pre-paged; page changes are forwarded to the caller and
    /// the total count is caller-supplied.
    Server { total: usize },
}

/// Everything a page supplies to mount a grid.
///
/// # Example
///
/// ```no_run
/// use rxgrid_lib::grid::GridConfig;
/// use rxgrid_lib::model::{Column, Value};
///
/// #[derive(Clone)]
/// struct Vendor { vendor_no: String, name: String }
///
/// let config = GridConfig::new(
///     "vendors",
///     vec![
///         Column::new("vendor_no", "Vendor No", |v: &Vendor| Value::from(v.vendor_no.as_str())),
///         Column::new("name", "Name", |v: &Vendor| Value::from(v.name.as_str())),
///     ],
/// )
/// .export_name("vendors");
/// ```
pub struct GridConfig<T> {
    pub(crate) table_id: String,
    pub(crate) export_name: String,
    pub(crate) columns: Vec<Column<T>>,
    pub(crate) rows: Vec<T>,
    pub(crate) paging: PagingMode,
    pub(crate) default_page_size: usize,
    pub(crate) callbacks: Callbacks<T>,
}

impl<T> GridConfig<T> {
    /// Creates a config for one logical table.
    ///
    /// The `table_id` keys the persisted preferences and doubles as the
    /// default export file-name stem.
    pub fn new(table_id: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        let table_id = table_id.into();
        Self {
            export_name: table_id.clone(),
            table_id,
            columns,
            rows: Vec::new(),
            paging: PagingMode::Client,
            default_page_size: DEFAULT_PAGE_SIZE,
            callbacks: Callbacks::default(),
        }
    }

    /// Initial row collection.
    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }

    /// File-name stem for exported artifacts.
    pub fn export_name(mut self, name: impl Into<String>) -> Self {
        self.export_name = name.into();
        self
    }

    /// Switch to server-driven paging with a caller-supplied total.
    pub fn server_paging(mut self, total: usize) -> Self {
        self.paging = PagingMode::Server { total };
        self
    }

    /// Page size used when no preference is stored.
    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Business-layer callbacks.
    pub fn callbacks(mut self, callbacks: Callbacks<T>) -> Self {
        self.callbacks = callbacks;
        self
    }
}
