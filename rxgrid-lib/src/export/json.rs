//! JSON export.

use crate::model::{Column, Value};

use super::ExportError;

/// Serializes the projected view as a JSON array of objects keyed by
/// column key.
///
/// Scalar types survive as JSON scalars; decimals, GUIDs, timestamps and
/// money become strings to avoid precision loss.
pub fn to_json<T>(rows: &[T], columns: &[Column<T>]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut object = serde_json::Map::new();
        for column in columns {
            object.insert(column.key().to_string(), json_value(&column.value_of(row)));
        }
        out.push(serde_json::Value::Object(object));
    }
    serde_json::to_vec_pretty(&out).map_err(|e| ExportError::Serialization(format!("json: {e}")))
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => (*b).into(),
        Value::Int(n) => (*n).into(),
        Value::Long(n) => (*n).into(),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        other => serde_json::Value::String(other.display_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Invoice {
        number: String,
        amount: f64,
    }

    #[test]
    fn objects_are_keyed_by_column_key() {
        let rows = vec![Invoice {
            number: "INV-001".into(),
            amount: 125.5,
        }];
        let columns = vec![
            Column::new("number", "Invoice No", |i: &Invoice| {
                Value::from(i.number.as_str())
            }),
            Column::new("amount", "Amount", |i: &Invoice| Value::from(i.amount)),
        ];

        let bytes = to_json(&rows, &columns).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed[0]["number"], "INV-001");
        assert_eq!(parsed[0]["amount"], 125.5);
    }
}
