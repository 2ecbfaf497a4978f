//! Delimited-text export.

use crate::model::Column;

use super::ExportError;

/// Serializes the projected view as RFC 4180 CSV (UTF-8, comma-delimited).
///
/// The header row carries the on-screen column titles in visible order;
/// each data row is the raw accessor values, stringified.
pub fn to_csv<T>(rows: &[T], columns: &[Column<T>]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.title()))
        .map_err(|e| ExportError::Serialization(format!("csv header: {e}")))?;

    for (i, row) in rows.iter().enumerate() {
        let record: Vec<String> = columns.iter().map(|c| c.export_value(row)).collect();
        writer
            .write_record(&record)
            .map_err(|e| ExportError::Serialization(format!("csv row {i}: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| ExportError::Serialization(format!("csv flush: {e}")))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Serialization(format!("csv finish: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[derive(Clone)]
    struct Vendor {
        name: String,
        city: Option<String>,
    }

    fn columns() -> Vec<Column<Vendor>> {
        vec![
            Column::new("name", "Name", |v: &Vendor| Value::from(v.name.as_str())),
            Column::new("city", "City", |v: &Vendor| {
                Value::from(v.city.as_deref().map(str::to_string))
            }),
        ]
    }

    #[test]
    fn writes_titles_and_raw_values() {
        let rows = vec![
            Vendor {
                name: "Contoso Pharma".into(),
                city: Some("Basel".into()),
            },
            Vendor {
                name: "Acme, Inc.".into(),
                city: None,
            },
        ];
        let bytes = to_csv(&rows, &columns()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("Name,City\n"));
        assert!(text.contains("Contoso Pharma,Basel"));
        // Comma in the value forces quoting; absent value is an empty field.
        assert!(text.contains("\"Acme, Inc.\","));
    }

    #[test]
    fn render_closures_do_not_leak_into_exports() {
        let rows = vec![Vendor {
            name: "Contoso Pharma".into(),
            city: Some("Basel".into()),
        }];
        let columns = vec![
            Column::new("name", "Name", |v: &Vendor| Value::from(v.name.as_str()))
                .render(|_, _| "***redacted***".to_string()),
        ];
        let text = String::from_utf8(to_csv(&rows, &columns).unwrap()).unwrap();
        assert!(text.contains("Contoso Pharma"));
        assert!(!text.contains("redacted"));
    }
}
