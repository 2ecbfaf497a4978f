//! Print-surface markup.

use crate::model::Column;

/// Renders the projected view as self-contained HTML for the host's print
/// dialog: the same colored title band and striped, bordered table the PDF
/// export draws, plus a footer with the generation timestamp.
///
/// No file is produced; the caller feeds the markup to an off-screen frame
/// and submits it to the platform print dialog.
pub fn to_print_markup<T>(
    rows: &[T],
    columns: &[Column<T>],
    title: &str,
    subtitle: Option<&str>,
) -> String {
    let mut html = String::with_capacity(1024 + rows.len() * columns.len() * 24);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    html.push_str("@page { size: A4 landscape; margin: 12mm; }\n");
    html.push_str("body { font-family: sans-serif; margin: 0; }\n");
    html.push_str(".band { background: #1f4e79; color: #fff; padding: 10px 14px; }\n");
    html.push_str(".band h1 { font-size: 18px; margin: 0; }\n");
    html.push_str(".band p { font-size: 12px; margin: 4px 0 0; }\n");
    html.push_str("table { border-collapse: collapse; width: 100%; margin-top: 8px; }\n");
    html.push_str("th, td { border: 1px solid #9aa5b1; padding: 4px 8px; font-size: 12px; text-align: left; }\n");
    html.push_str("th { background: #dbe5f0; }\n");
    html.push_str("tbody tr:nth-child(even) { background: #f2f6fa; }\n");
    html.push_str("thead { display: table-header-group; }\n");
    html.push_str(".footer { font-size: 10px; color: #666; margin-top: 8px; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<div class=\"band\"><h1>");
    html.push_str(&escape(title));
    html.push_str("</h1>");
    if let Some(subtitle) = subtitle {
        html.push_str("<p>");
        html.push_str(&escape(subtitle));
        html.push_str("</p>");
    }
    html.push_str("</div>\n");

    html.push_str("<table>\n<thead><tr>");
    for column in columns {
        html.push_str("<th>");
        html.push_str(&escape(column.title()));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for column in columns {
            html.push_str("<td>");
            html.push_str(&escape(&column.export_value(row)));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"footer\">generated ");
    html.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M").to_string());
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
