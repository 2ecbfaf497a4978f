//! Sort direction and stable in-memory sorting.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Column;

/// Sort direction for ordering rows.
///
/// Serializes as `"ascend"` / `"descend"` in preference records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    Ascend,
    /// Descending order (Z-A, 9-0).
    Descend,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascend => SortOrder::Descend,
            SortOrder::Descend => SortOrder::Ascend,
        }
    }
}

/// Sorts rows by one column's display string, lexicographically.
///
/// The sort is stable: rows whose sort keys compare equal keep their input
/// order, in either direction. A field that matches no column leaves the
/// rows untouched.
pub fn sort_rows<T>(rows: &mut [T], field: &str, order: SortOrder, columns: &[Column<T>]) {
    let Some(column) = columns.iter().find(|c| c.key() == field) else {
        return;
    };

    rows.sort_by(|a, b| {
        let (a, b) = (column.export_value(a), column.export_value(b));
        match order {
            SortOrder::Ascend => a.cmp(&b),
            SortOrder::Descend => b.cmp(&a),
        }
    });
}
