//! GridRow trait for row identity.

/// Trait for records that can be displayed as grid rows.
///
/// The engine treats rows as opaque beyond this trait: columns read values
/// through accessor closures, and the identifier returned here is what the
/// selection set and bulk operations key on.
///
/// # Examples
///
/// ```
/// use rxgrid_lib::model::GridRow;
///
/// #[derive(Clone)]
/// struct Vendor {
///     vendor_no: String,
///     name: String,
/// }
///
/// impl GridRow for Vendor {
///     fn id(&self) -> String {
///         self.vendor_no.clone()
///     }
/// }
/// ```
pub trait GridRow: Send + Sync + Clone + 'static {
    /// Unique identifier for this row.
    ///
    /// Used for stable selection across filtering and re-sorting. Must not
    /// change for the lifetime of the record.
    fn id(&self) -> String;
}
