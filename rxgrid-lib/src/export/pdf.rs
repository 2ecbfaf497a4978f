//! Paginated-document export.
//!
//! Draws the projected view as an A4-landscape PDF: a colored title band
//! repeated on every page, a bordered table with alternating row shading,
//! and a footer carrying the generation timestamp and `page i / n`.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};
use tokio_util::sync::CancellationToken;

use crate::model::Column;

use super::ExportError;

// A4 landscape, millimetres. Origin is the bottom-left corner.
const PAGE_W: f64 = 297.0;
const PAGE_H: f64 = 210.0;
const MARGIN: f64 = 12.0;
const CONTENT_W: f64 = PAGE_W - 2.0 * MARGIN;
const BAND_H: f64 = 18.0;
const HEADER_H: f64 = 8.0;
const ROW_H: f64 = 7.0;
const FOOTER_H: f64 = 10.0;

const BAND_TOP: f64 = PAGE_H - MARGIN;
const TABLE_TOP: f64 = BAND_TOP - BAND_H - 2.0;
const TABLE_FLOOR: f64 = MARGIN + FOOTER_H;
const ROWS_PER_PAGE: usize = ((TABLE_TOP - HEADER_H - TABLE_FLOOR) / ROW_H) as usize;

const TITLE_SIZE: f64 = 14.0;
const SUBTITLE_SIZE: f64 = 9.0;
const CELL_SIZE: f64 = 9.0;
const FOOTER_SIZE: f64 = 8.0;

/// Title-band options for the paginated document.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    title: String,
    subtitle: Option<String>,
}

impl PdfOptions {
    /// Creates options with the given band title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }

    /// Adds a subtitle line under the title.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Serializes the projected view as a paginated PDF.
pub fn to_pdf<T>(
    rows: &[T],
    columns: &[Column<T>],
    options: &PdfOptions,
) -> Result<Vec<u8>, ExportError> {
    to_pdf_with_cancel(rows, columns, options, &CancellationToken::new())
}

/// Serializes the projected view as a paginated PDF, checking the token
/// between rows.
///
/// Cancellation discards the in-progress buffer and resolves to
/// [`ExportError::Cancelled`]; no partial artifact escapes.
pub fn to_pdf_with_cancel<T>(
    rows: &[T],
    columns: &[Column<T>],
    options: &PdfOptions,
    cancel: &CancellationToken,
) -> Result<Vec<u8>, ExportError> {
    let page_total = rows.len().div_ceil(ROWS_PER_PAGE).max(1);

    let (doc, first_page, first_layer) =
        PdfDocument::new(options.title.clone(), Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let chrome = Chrome {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
        widths: column_widths(columns),
        generated: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        page_total,
    };

    for page_index in 0..page_total {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let start = page_index * ROWS_PER_PAGE;
        let end = (start + ROWS_PER_PAGE).min(rows.len());
        let chunk = if start < rows.len() { &rows[start..end] } else { &[] };

        draw_page(&layer, chunk, columns, options, &chrome, page_index + 1, cancel)?;
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer).map_err(pdf_err)?;
    buffer
        .into_inner()
        .map_err(|e| ExportError::Serialization(format!("pdf: {e}")))
}

/// Per-document drawing resources shared by all pages.
struct Chrome {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    widths: Vec<f64>,
    generated: String,
    page_total: usize,
}

fn draw_page<T>(
    layer: &PdfLayerReference,
    rows: &[T],
    columns: &[Column<T>],
    options: &PdfOptions,
    chrome: &Chrome,
    page_number: usize,
    cancel: &CancellationToken,
) -> Result<(), ExportError> {
    // Title band, repeated on every page.
    layer.set_fill_color(Color::Rgb(Rgb::new(0.12, 0.31, 0.47, None)));
    fill_rect(layer, MARGIN, BAND_TOP - BAND_H, CONTENT_W, BAND_H);

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    layer.use_text(
        options.title.clone(),
        TITLE_SIZE,
        Mm(MARGIN + 4.0),
        Mm(BAND_TOP - 7.5),
        &chrome.bold,
    );
    if let Some(subtitle) = &options.subtitle {
        layer.use_text(
            subtitle.clone(),
            SUBTITLE_SIZE,
            Mm(MARGIN + 4.0),
            Mm(BAND_TOP - 14.0),
            &chrome.regular,
        );
    }

    // Header row.
    layer.set_fill_color(Color::Rgb(Rgb::new(0.86, 0.9, 0.94, None)));
    fill_rect(layer, MARGIN, TABLE_TOP - HEADER_H, CONTENT_W, HEADER_H);

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let mut x = MARGIN;
    for (column, width) in columns.iter().zip(&chrome.widths) {
        layer.use_text(
            fit_text(column.title(), *width, CELL_SIZE),
            CELL_SIZE,
            Mm(x + 1.5),
            Mm(TABLE_TOP - 5.5),
            &chrome.bold,
        );
        x += width;
    }

    // Data rows with alternating shading.
    for (i, row) in rows.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        let row_top = TABLE_TOP - HEADER_H - ROW_H * i as f64;

        if i % 2 == 1 {
            layer.set_fill_color(Color::Rgb(Rgb::new(0.95, 0.96, 0.98, None)));
            fill_rect(layer, MARGIN, row_top - ROW_H, CONTENT_W, ROW_H);
            layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        }

        let mut x = MARGIN;
        for (column, width) in columns.iter().zip(&chrome.widths) {
            layer.use_text(
                fit_text(&column.export_value(row), *width, CELL_SIZE),
                CELL_SIZE,
                Mm(x + 1.5),
                Mm(row_top - 5.0),
                &chrome.regular,
            );
            x += width;
        }
    }

    // Borders: outer frame, header separator, column separators.
    let table_bottom = TABLE_TOP - HEADER_H - ROW_H * rows.len() as f64;
    layer.set_outline_color(Color::Rgb(Rgb::new(0.55, 0.6, 0.65, None)));
    layer.set_outline_thickness(0.3);
    stroke_rect(layer, MARGIN, table_bottom, CONTENT_W, TABLE_TOP - table_bottom);
    hline(layer, MARGIN, MARGIN + CONTENT_W, TABLE_TOP - HEADER_H);
    let mut x = MARGIN;
    for width in &chrome.widths[..chrome.widths.len().saturating_sub(1)] {
        x += width;
        vline(layer, x, table_bottom, TABLE_TOP);
    }

    // Footer: timestamp on the left, page index on the right.
    layer.set_fill_color(Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None)));
    layer.use_text(
        format!("generated {}", chrome.generated),
        FOOTER_SIZE,
        Mm(MARGIN),
        Mm(MARGIN + 1.0),
        &chrome.regular,
    );
    let page_text = format!("page {} / {}", page_number, chrome.page_total);
    let page_text_w = page_text.chars().count() as f64 * FOOTER_SIZE * 0.176;
    layer.use_text(
        page_text,
        FOOTER_SIZE,
        Mm(PAGE_W - MARGIN - page_text_w),
        Mm(MARGIN + 1.0),
        &chrome.regular,
    );

    Ok(())
}

fn column_widths<T>(columns: &[Column<T>]) -> Vec<f64> {
    let weights: Vec<f64> = columns
        .iter()
        .map(|c| c.fixed_width().map(f64::from).unwrap_or(12.0))
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return weights;
    }
    weights.iter().map(|w| CONTENT_W * w / sum).collect()
}

/// Truncates text to what fits in `width` millimetres at the given font
/// size, using an average Helvetica advance width.
fn fit_text(text: &str, width: f64, font_size: f64) -> String {
    let char_w = font_size * 0.176;
    let max_chars = ((width - 3.0) / char_w).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

fn fill_rect(layer: &PdfLayerReference, x: f64, y: f64, w: f64, h: f64) {
    layer.add_shape(rect(x, y, w, h, true, false));
}

fn stroke_rect(layer: &PdfLayerReference, x: f64, y: f64, w: f64, h: f64) {
    layer.add_shape(rect(x, y, w, h, false, true));
}

fn rect(x: f64, y: f64, w: f64, h: f64, fill: bool, stroke: bool) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ],
        is_closed: true,
        has_fill: fill,
        has_stroke: stroke,
        is_clipping_path: false,
    }
}

fn hline(layer: &PdfLayerReference, x1: f64, x2: f64, y: f64) {
    layer.add_shape(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    });
}

fn vline(layer: &PdfLayerReference, x: f64, y1: f64, y2: f64) {
    layer.add_shape(Line {
        points: vec![
            (Point::new(Mm(x), Mm(y1)), false),
            (Point::new(Mm(x), Mm(y2)), false),
        ],
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    });
}

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Serialization(format!("pdf: {e}"))
}
