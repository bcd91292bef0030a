use serde_json::{Map, Value};

/// A single result row: column key -> scalar value (string | number | null).
/// Rows are produced fresh on every execution and never cached; the column
/// list returned alongside them carries presentation order.
pub type ResultRow = Map<String, Value>;

/// Coerce a scalar to a finite `f64` for numeric reductions and comparisons.
///
/// JSON numbers pass through; strings are parsed (covering numeric strings
/// coming from loosely typed stores). Everything else, including booleans and
/// composites, is not numeric-coercible and is excluded from reductions.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Stringified form of a scalar used as a group key. `None` for null so the
/// caller can substitute the sentinel label; composites fall back to their
/// JSON text to keep the key total and deterministic.
pub fn group_label(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => serde_json::to_string(other).ok(),
    }
}

/// Build a JSON number from an `f64`, collapsing integral results to JSON
/// integers (`4`, not `4.0`) so grouped output and exports stay clean.
pub fn json_number(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Value::Number(serde_json::Number::from(f as i64))
    } else {
        serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}
