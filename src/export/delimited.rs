use serde_json::Value;

use crate::ResultRow;

/// Render rows as delimited text in `columns` order.
///
/// The header is the column keys joined by the delimiter. String values are
/// always quoted with embedded quotes doubled; numbers and booleans are
/// emitted bare; null or missing values become empty fields. The output is
/// injective modulo quoting, so any conformant parser recovers the original
/// values.
pub fn to_delimited_text(rows: &[ResultRow], columns: &[String], delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut out = columns.join(&sep);

    for row in rows {
        out.push('\n');
        let fields: Vec<String> = columns
            .iter()
            .map(|column| render_field(row.get(column)))
            .collect();
        out.push_str(&fields.join(&sep));
    }

    out
}

/// Comma-separated convenience wrapper.
pub fn to_csv(rows: &[ResultRow], columns: &[String]) -> String {
    to_delimited_text(rows, columns, ',')
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => quote(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // composites should not appear in result rows; keep them parseable
        Some(other) => quote(&other.to_string()),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
