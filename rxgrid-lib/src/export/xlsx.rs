//! Spreadsheet export.

use rust_xlsxwriter::{Format, Workbook};

use crate::model::Column;

use super::ExportError;

/// Serializes the projected view as a single-sheet XLSX workbook.
///
/// One bold header row of column titles, then one row per record. Declared
/// column widths are carried over as sheet column widths. The workbook is
/// buffered in memory; nothing touches disk.
pub fn to_xlsx<T>(rows: &[T], columns: &[Column<T>]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (i, column) in columns.iter().enumerate() {
        let col = i as u16;
        sheet
            .write_string_with_format(0, col, column.title(), &header)
            .map_err(xlsx_err)?;
        if let Some(width) = column.fixed_width() {
            sheet.set_column_width(col, f64::from(width)).map_err(xlsx_err)?;
        }
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, column) in columns.iter().enumerate() {
            sheet
                .write_string((r as u32) + 1, c as u16, column.export_value(row))
                .map_err(xlsx_err)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> ExportError {
    ExportError::Serialization(format!("xlsx: {e}"))
}
