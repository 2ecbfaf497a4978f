//! Caller-supplied callbacks and the affordances they unlock.

use std::sync::Arc;

/// Handler for a parameterless grid action.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// Handler receiving one row.
pub type RowHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handler receiving the resolved rows of a bulk operation.
pub type BulkHandler<T> = Arc<dyn Fn(Vec<T>) + Send + Sync>;

/// Handler receiving `(page, page_size)` in server paging mode.
pub type PageHandler = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// The business-layer callbacks a page wires into the grid.
///
/// All are optional; an absent callback simply omits the corresponding
/// affordance (no delete callback, no delete action). The engine only
/// triggers callbacks; it never interprets their outcome and never
/// mutates its own data optimistically. The caller owns refetching after a
/// successful mutation.
pub struct Callbacks<T> {
    pub on_add: Option<ActionHandler>,
    pub on_edit: Option<RowHandler<T>>,
    pub on_view: Option<RowHandler<T>>,
    pub on_delete: Option<RowHandler<T>>,
    pub on_bulk_delete: Option<BulkHandler<T>>,
    pub on_refresh: Option<ActionHandler>,
    pub on_page_change: Option<PageHandler>,
}

impl<T> Callbacks<T> {
    /// Creates an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_add(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_add = Some(Arc::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_edit = Some(Arc::new(f));
        self
    }

    pub fn on_view(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_view = Some(Arc::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Arc::new(f));
        self
    }

    pub fn on_bulk_delete(mut self, f: impl Fn(Vec<T>) + Send + Sync + 'static) -> Self {
        self.on_bulk_delete = Some(Arc::new(f));
        self
    }

    pub fn on_refresh(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_refresh = Some(Arc::new(f));
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Which affordances the wired callbacks unlock.
    pub fn available(&self) -> Actions {
        Actions {
            add: self.on_add.is_some(),
            edit: self.on_edit.is_some(),
            view: self.on_view.is_some(),
            delete: self.on_delete.is_some(),
            bulk_delete: self.on_bulk_delete.is_some(),
            refresh: self.on_refresh.is_some(),
        }
    }
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_add: None,
            on_edit: None,
            on_view: None,
            on_delete: None,
            on_bulk_delete: None,
            on_refresh: None,
            on_page_change: None,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            on_add: self.on_add.clone(),
            on_edit: self.on_edit.clone(),
            on_view: self.on_view.clone(),
            on_delete: self.on_delete.clone(),
            on_bulk_delete: self.on_bulk_delete.clone(),
            on_refresh: self.on_refresh.clone(),
            on_page_change: self.on_page_change.clone(),
        }
    }
}

/// The row/bulk actions a grid should render, derived from which callbacks
/// the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    pub add: bool,
    pub edit: bool,
    pub view: bool,
    pub delete: bool,
    pub bulk_delete: bool,
    pub refresh: bool,
}
