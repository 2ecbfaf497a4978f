//! Column descriptors for the grid.

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Which edge a column is pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pinned {
    Left,
    Right,
}

/// Accessor closure mapping a row to the cell value for one column.
pub type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Optional display renderer for a cell.
///
/// Receives the accessor value and the full record, returns the on-screen
/// text. Exports never call this; they stringify the raw value instead.
pub type CellRender<T> = Arc<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the grid: a stable key, the header
/// title, optional fixed width and pinning, and the accessor that reads the
/// cell value out of a row. Supplied by the caller at mount time and never
/// mutated by the engine.
///
/// # Examples
///
/// ```
/// use rxgrid_lib::model::{Column, Value};
///
/// #[derive(Clone)]
/// struct Batch {
///     batch_no: String,
///     quantity: i32,
/// }
///
/// let columns = vec![
///     Column::new("batch_no", "Batch No", |b: &Batch| Value::from(b.batch_no.as_str())),
///     Column::new("quantity", "Quantity", |b: &Batch| Value::from(b.quantity)).width(10),
/// ];
/// ```
pub struct Column<T> {
    key: String,
    title: String,
    width: Option<u16>,
    pinned: Option<Pinned>,
    accessor: Accessor<T>,
    render: Option<CellRender<T>>,
}

impl<T> Column<T> {
    /// Create a new column with a key, header title and value accessor.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            pinned: None,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    /// Set a fixed column width (display hint, also used for XLSX/PDF sizing).
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Pin the column to an edge.
    pub fn pinned(mut self, side: Pinned) -> Self {
        self.pinned = Some(side);
        self
    }

    /// Attach a display renderer.
    ///
    /// Only affects on-screen cell text; filtering, sorting and export keep
    /// reading the raw accessor value.
    pub fn render(mut self, render: impl Fn(&Value, &T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// The column's stable key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header title shown on screen and in export headers.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fixed width, if set.
    pub fn fixed_width(&self) -> Option<u16> {
        self.width
    }

    /// Pinned edge, if set.
    pub fn pin(&self) -> Option<Pinned> {
        self.pinned
    }

    /// Read the raw cell value for a row.
    pub fn value_of(&self, row: &T) -> Value {
        (self.accessor)(row)
    }

    /// On-screen cell text: the renderer if present, the raw value otherwise.
    pub fn display_of(&self, row: &T) -> String {
        let value = self.value_of(row);
        match &self.render {
            Some(render) => render(&value, row),
            None => value.display_string(),
        }
    }

    /// Export cell text: always the raw value's stringification.
    ///
    /// Exports are data-accurate, not presentation-accurate, so the display
    /// renderer is deliberately bypassed here.
    pub fn export_value(&self, row: &T) -> String {
        self.value_of(row).display_string()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            width: self.width,
            pinned: self.pinned,
            accessor: Arc::clone(&self.accessor),
            render: self.render.as_ref().map(Arc::clone),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}
