use serde::{Deserialize, Serialize};

/// Predicate operators a report filter can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
        }
    }
}

/// One predicate clause of a report definition. The `value` is kept as text
/// (the form the UI produces) and coerced at evaluation time.
///
/// A filter with an empty `value` is inert: the UI builds filters
/// incrementally, so an empty one is skipped at execution rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn new(field: &str, operator: FilterOperator, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.value.is_empty()
    }
}
