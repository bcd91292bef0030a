use serde::{Deserialize, Serialize};

use crate::{aggregate::Aggregation, filter::Filter};

/// How the presentation layer should render the result set. A hint only;
/// the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visualization {
    #[default]
    Table,
    Bar,
    Pie,
    Line,
}

/// The declarative shape of a report. This is the whole of what gets
/// persisted: result rows never are, so a reloaded report always reflects
/// live data.
///
/// `aggregations` only take effect when `group_by` is set; without grouping
/// they are ignored entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub entity: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
    #[serde(default)]
    pub visualization: Visualization,
    #[serde(default)]
    pub name: String,
}

impl ReportDefinition {
    pub fn new(entity: &str, columns: &[&str]) -> Self {
        Self {
            entity: entity.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            filters: Vec::new(),
            group_by: None,
            aggregations: Vec::new(),
            visualization: Visualization::default(),
            name: String::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn grouped_by(mut self, column: &str) -> Self {
        self.group_by = Some(column.to_string());
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    pub fn with_visualization(mut self, visualization: Visualization) -> Self {
        self.visualization = visualization;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::{aggregate::AggregateFunction, filter::FilterOperator};

    #[test]
    fn definition_round_trips_through_json() {
        let def = ReportDefinition::new("companies", &["name", "industry"])
            .named("tech companies by industry")
            .with_filter(Filter::new("industry", FilterOperator::Equals, "Tech"))
            .grouped_by("industry")
            .with_aggregation(Aggregation::new(AggregateFunction::Count, "id"))
            .with_visualization(Visualization::Pie);

        let text = serde_json::to_string(&def).unwrap();
        let back: ReportDefinition = serde_json::from_str(&text).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn optional_sections_default_when_absent() {
        let def: ReportDefinition = serde_json::from_value(json!({
            "entity": "companies",
            "columns": ["name"]
        }))
        .unwrap();

        assert!(def.filters.is_empty());
        assert!(def.group_by.is_none());
        assert!(def.aggregations.is_empty());
        assert_eq!(def.visualization, Visualization::Table);
        assert!(def.name.is_empty());
    }
}
