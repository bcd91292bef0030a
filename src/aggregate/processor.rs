use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    ResultRow,
    aggregate::{Accumulator, Aggregation},
    row::group_label,
};

/// Group `rows` by the stringified value of `group_by` and compute one
/// column per aggregation. Pure: no I/O, same inputs produce same outputs.
///
/// Rows whose group-by value is null or missing land in the sentinel group
/// `unknown_label` instead of being dropped. Output rows appear in
/// first-seen order of their group key, which is the determinism guarantee
/// tests rely on.
pub fn aggregate(
    rows: &[ResultRow],
    group_by: &str,
    aggregations: &[Aggregation],
    unknown_label: &str,
) -> Vec<ResultRow> {
    let mut groups: IndexMap<String, Vec<Box<dyn Accumulator>>> = IndexMap::new();

    for row in rows {
        let label = row
            .get(group_by)
            .and_then(group_label)
            .unwrap_or_else(|| unknown_label.to_string());

        let accs = groups
            .entry(label)
            .or_insert_with(|| aggregations.iter().map(|a| a.function.accumulator()).collect());

        for (acc, agg) in accs.iter_mut().zip(aggregations) {
            acc.update(row.get(&agg.field).unwrap_or(&Value::Null));
        }
    }

    groups
        .into_iter()
        .map(|(label, accs)| {
            let mut out = ResultRow::new();
            out.insert(group_by.to_string(), Value::String(label));
            for (agg, acc) in aggregations.iter().zip(accs) {
                out.insert(agg.output_key(), acc.finalize());
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::aggregate::AggregateFunction;

    fn rows(values: &[Value]) -> Vec<ResultRow> {
        values
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn sums_per_group_in_first_seen_order() {
        let input = rows(&[
            json!({ "g": "A", "v": 1 }),
            json!({ "g": "A", "v": 3 }),
            json!({ "g": "B", "v": 5 }),
        ]);
        let out = aggregate(&input, "g", &[Aggregation::new(AggregateFunction::Sum, "v")], "Unknown");

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["g"], json!("A"));
        assert_eq!(out[0]["sum_v"], json!(4));
        assert_eq!(out[1]["g"], json!("B"));
        assert_eq!(out[1]["sum_v"], json!(5));
    }

    #[test]
    fn first_seen_order_is_preserved_not_sorted() {
        let input = rows(&[
            json!({ "g": "zebra", "v": 1 }),
            json!({ "g": "alpha", "v": 1 }),
            json!({ "g": "zebra", "v": 1 }),
        ]);
        let out = aggregate(&input, "g", &[Aggregation::new(AggregateFunction::Count, "v")], "Unknown");

        assert_eq!(out[0]["g"], json!("zebra"));
        assert_eq!(out[0]["count_v"], json!(2));
        assert_eq!(out[1]["g"], json!("alpha"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = aggregate(&[], "g", &[Aggregation::new(AggregateFunction::Max, "v")], "Unknown");
        assert!(out.is_empty());
    }

    #[test]
    fn null_and_missing_group_values_land_in_sentinel_group() {
        let input = rows(&[
            json!({ "g": null, "v": 1 }),
            json!({ "v": 2 }),
            json!({ "g": "A", "v": 4 }),
        ]);
        let out = aggregate(&input, "g", &[Aggregation::new(AggregateFunction::Sum, "v")], "Unknown");

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["g"], json!("Unknown"));
        assert_eq!(out[0]["sum_v"], json!(3));
        assert_eq!(out[1]["g"], json!("A"));
    }

    #[test]
    fn non_numeric_group_yields_zero_fallbacks_not_nan() {
        let input = rows(&[
            json!({ "g": "A", "v": "oops" }),
            json!({ "g": "A", "v": null }),
        ]);
        let aggs = vec![
            Aggregation::new(AggregateFunction::Max, "v"),
            Aggregation::new(AggregateFunction::Min, "v"),
            Aggregation::new(AggregateFunction::Avg, "v"),
        ];
        let out = aggregate(&input, "g", &aggs, "Unknown");

        assert_eq!(out[0]["max_v"], json!(0));
        assert_eq!(out[0]["min_v"], json!(0));
        assert_eq!(out[0]["avg_v"], json!(0));
    }

    #[test]
    fn multiple_functions_over_same_field_do_not_collide() {
        let input = rows(&[
            json!({ "g": "A", "v": 2 }),
            json!({ "g": "A", "v": 6 }),
        ]);
        let aggs = vec![
            Aggregation::new(AggregateFunction::Sum, "v"),
            Aggregation::new(AggregateFunction::Avg, "v"),
            Aggregation::new(AggregateFunction::Count, "v"),
        ];
        let out = aggregate(&input, "g", &aggs, "Unknown");

        assert_eq!(out[0]["sum_v"], json!(8));
        assert_eq!(out[0]["avg_v"], json!(4));
        assert_eq!(out[0]["count_v"], json!(2));
    }

    #[test]
    fn numeric_group_keys_are_stringified() {
        let input = rows(&[
            json!({ "g": 7, "v": 1 }),
            json!({ "g": 7, "v": 2 }),
        ]);
        let out = aggregate(&input, "g", &[Aggregation::new(AggregateFunction::Count, "v")], "Unknown");

        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["g"], json!("7"));
    }

    #[test]
    fn empty_aggregations_produce_one_row_per_group() {
        let input = rows(&[
            json!({ "g": "A" }),
            json!({ "g": "B" }),
            json!({ "g": "A" }),
        ]);
        let out = aggregate(&input, "g", &[], "Unknown");

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 1);
        assert_eq!(out[0]["g"], json!("A"));
    }
}
