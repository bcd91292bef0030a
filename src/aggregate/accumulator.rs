use serde_json::Value;

use crate::{
    aggregate::AggregateFunction,
    row::{coerce_numeric, json_number},
};

/// Per-group running state of one aggregation.
///
/// The processor calls `update` once per row in the group with the raw field
/// value (null for missing fields) and `finalize` after the last row.
/// Non-numeric values are excluded from numeric reductions rather than
/// failing them, and an empty numeric reduction finalizes to `0` — never
/// NaN, Infinity or null.
pub trait Accumulator {
    fn update(&mut self, value: &Value);
    fn finalize(&self) -> Value;
}

impl AggregateFunction {
    pub fn accumulator(&self) -> Box<dyn Accumulator> {
        match self {
            AggregateFunction::Count => Box::new(CountAcc::default()),
            AggregateFunction::Sum => Box::new(SumAcc::default()),
            AggregateFunction::Avg => Box::new(AvgAcc::default()),
            AggregateFunction::Max => Box::new(ExtremaAcc::new_max()),
            AggregateFunction::Min => Box::new(ExtremaAcc::new_min()),
        }
    }
}

/// Counts rows, not non-null field values.
#[derive(Default)]
struct CountAcc {
    rows: u64,
}

impl Accumulator for CountAcc {
    fn update(&mut self, _value: &Value) {
        self.rows += 1;
    }

    fn finalize(&self) -> Value {
        Value::Number(serde_json::Number::from(self.rows))
    }
}

#[derive(Default)]
struct SumAcc {
    total: f64,
}

impl Accumulator for SumAcc {
    fn update(&mut self, value: &Value) {
        if let Some(n) = coerce_numeric(value) {
            self.total += n;
        }
    }

    fn finalize(&self) -> Value {
        json_number(self.total)
    }
}

#[derive(Default)]
struct AvgAcc {
    sum: f64,
    cnt: u64,
}

impl Accumulator for AvgAcc {
    fn update(&mut self, value: &Value) {
        if let Some(n) = coerce_numeric(value) {
            self.sum += n;
            self.cnt += 1;
        }
    }

    fn finalize(&self) -> Value {
        if self.cnt == 0 {
            json_number(0.0)
        } else {
            json_number(self.sum / self.cnt as f64)
        }
    }
}

enum Mode {
    Min,
    Max,
}

struct ExtremaAcc {
    mode: Mode,
    current: Option<f64>,
}

impl ExtremaAcc {
    fn new_min() -> Self {
        Self { mode: Mode::Min, current: None }
    }

    fn new_max() -> Self {
        Self { mode: Mode::Max, current: None }
    }
}

impl Accumulator for ExtremaAcc {
    fn update(&mut self, value: &Value) {
        let Some(n) = coerce_numeric(value) else { return };
        self.current = Some(match (&self.mode, self.current) {
            (_, None) => n,
            (Mode::Min, Some(cur)) => cur.min(n),
            (Mode::Max, Some(cur)) => cur.max(n),
        });
    }

    fn finalize(&self) -> Value {
        json_number(self.current.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---------- count ----------

    #[test]
    fn count_counts_rows_regardless_of_value() {
        let mut acc = AggregateFunction::Count.accumulator();
        acc.update(&json!(1));
        acc.update(&Value::Null);
        acc.update(&json!("text"));
        assert_eq!(acc.finalize(), json!(3));
    }

    // ---------- sum ----------

    #[test]
    fn sum_skips_non_numeric_values() {
        let mut acc = AggregateFunction::Sum.accumulator();
        acc.update(&json!(10));
        acc.update(&json!("n/a"));
        acc.update(&Value::Null);
        acc.update(&json!("2.5"));
        assert_eq!(acc.finalize(), json!(12.5));
    }

    #[test]
    fn empty_sum_is_zero() {
        let acc = AggregateFunction::Sum.accumulator();
        assert_eq!(acc.finalize(), json!(0));
    }

    // ---------- avg ----------

    #[test]
    fn avg_divides_by_numeric_count_only() {
        let mut acc = AggregateFunction::Avg.accumulator();
        acc.update(&json!(2));
        acc.update(&Value::Null);
        acc.update(&json!(4));
        assert_eq!(acc.finalize(), json!(3));
    }

    #[test]
    fn avg_over_no_numeric_values_is_zero_not_nan() {
        let mut acc = AggregateFunction::Avg.accumulator();
        acc.update(&json!("a"));
        acc.update(&Value::Null);
        assert_eq!(acc.finalize(), json!(0));
    }

    // ---------- min / max ----------

    #[test]
    fn min_max_track_extremes_over_numeric_values() {
        let mut min = AggregateFunction::Min.accumulator();
        let mut max = AggregateFunction::Max.accumulator();
        for v in [json!(5), json!("2"), json!(9.5), json!("skip me")] {
            min.update(&v);
            max.update(&v);
        }
        assert_eq!(min.finalize(), json!(2));
        assert_eq!(max.finalize(), json!(9.5));
    }

    #[test]
    fn min_max_over_no_numeric_values_is_zero() {
        let mut acc = AggregateFunction::Max.accumulator();
        acc.update(&json!("only text"));
        assert_eq!(acc.finalize(), json!(0));
    }
}
