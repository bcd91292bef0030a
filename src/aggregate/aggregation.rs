use serde::{Deserialize, Serialize};

/// The aggregate functions a grouped report can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl AggregateFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Max => "max",
            AggregateFunction::Min => "min",
        }
    }
}

/// One computed column of a grouped report: `function` applied to `field`
/// within each group. `Count` counts rows and ignores the field's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub function: AggregateFunction,
    pub field: String,
}

impl Aggregation {
    pub fn new(function: AggregateFunction, field: &str) -> Self {
        Self {
            function,
            field: field.to_string(),
        }
    }

    /// Output column key, derived so different functions over the same field
    /// never collide (`sum_revenue`, `avg_revenue`, ...).
    pub fn output_key(&self) -> String {
        format!("{}_{}", self.function.as_str(), self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_keys_are_function_qualified() {
        assert_eq!(Aggregation::new(AggregateFunction::Sum, "revenue").output_key(), "sum_revenue");
        assert_eq!(Aggregation::new(AggregateFunction::Count, "id").output_key(), "count_id");
    }

    #[test]
    fn functions_serialize_snake_case() {
        let a = Aggregation::new(AggregateFunction::Avg, "amount");
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"avg\""));
        let back: Aggregation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
