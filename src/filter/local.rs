use std::cmp::Ordering;

use serde_json::Value;

use crate::{
    ResultRow,
    filter::{Filter, FilterOperator},
    row::coerce_numeric,
};

/// Apply the local filters as a conjunction over fetched rows. Inert filters
/// never restrict; null or missing field values never match.
pub fn apply_local(filters: &[Filter], rows: Vec<ResultRow>) -> Vec<ResultRow> {
    if filters.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| filters.iter().all(|f| matches_row(f, row)))
        .collect()
}

pub fn matches_row(filter: &Filter, row: &ResultRow) -> bool {
    if filter.is_inert() {
        return true;
    }
    match row.get(&filter.field) {
        Some(actual) => eval_operator(filter.operator, actual, &filter.value),
        None => false,
    }
}

/// Shared operator semantics: the in-memory data store evaluates pushdown
/// clauses with this same function, so the remote and local dialects agree.
pub fn eval_operator(operator: FilterOperator, actual: &Value, expected: &str) -> bool {
    if actual.is_null() {
        return false;
    }
    match operator {
        FilterOperator::Equals => match (coerce_numeric(actual), expected.trim().parse::<f64>()) {
            (Some(a), Ok(b)) => a == b,
            _ => text_of(actual) == expected,
        },
        FilterOperator::Contains => {
            text_of(actual).to_lowercase().contains(&expected.to_lowercase())
        }
        FilterOperator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
        FilterOperator::LessThan => compare(actual, expected) == Some(Ordering::Less),
    }
}

// Numeric coercion first so "9" < "10"; lexicographic fallback covers ISO
// dates and plain text.
fn compare(actual: &Value, expected: &str) -> Option<Ordering> {
    if let (Some(a), Ok(b)) = (coerce_numeric(actual), expected.trim().parse::<f64>()) {
        return a.partial_cmp(&b);
    }
    Some(text_of(actual).as_str().cmp(expected))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
