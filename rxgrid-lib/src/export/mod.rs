//! Export of the current grid view to file and print formats.
//!
//! Every function here operates on the already-projected view: the filtered
//! row slice and the visible columns at the moment of invocation. Hidden
//! columns and filtered-out rows never reach an artifact.
//!
//! Artifacts are buffered fully in memory and returned as one `Result`; a
//! failure mid-serialization aborts the whole operation, so a partial file
//! can never be mistaken for a complete export.

mod csv;
mod json;
mod pdf;
mod print;
mod task;
mod xlsx;

pub use csv::to_csv;
pub use json::to_json;
pub use pdf::{PdfOptions, to_pdf, to_pdf_with_cancel};
pub use print::to_print_markup;
pub use task::ExportTask;
pub use xlsx::to_xlsx;

use thiserror::Error;

/// Export error type.
///
/// One error per failed operation; the engine never hands out a partial
/// artifact alongside it.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A row or value could not be serialized for the requested format.
    #[error("export serialization failed: {0}")]
    Serialization(String),
    /// The export was cancelled before completion.
    #[error("export cancelled")]
    Cancelled,
}

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Spreadsheet workbook (XLSX)
    Xlsx,
    /// JSON array
    Json,
    /// Paginated document (PDF)
    Pdf,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Json => "application/json",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A finished export: the bytes plus everything a host needs to hand the
/// file to the user.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Serialized artifact.
    pub bytes: Vec<u8>,
    /// Suggested file name, `{export_name}_{ISO-date}.{ext}`.
    pub file_name: String,
    /// MIME type for download/transfer headers.
    pub mime_type: &'static str,
    /// Number of data rows in the artifact.
    pub row_count: usize,
}

/// Builds the dated artifact file name: `{base}_{YYYY-MM-DD}.{ext}`.
pub fn export_file_name(base: &str, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        base,
        chrono::Local::now().format("%Y-%m-%d"),
        format.extension()
    )
}
