use serde::{Deserialize, Serialize};

use crate::{
    catalog::FieldCatalog,
    filter::{Filter, FilterOperator},
};

/// A filter clause in the form the entity data store evaluates remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushdownClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl From<&Filter> for PushdownClause {
    fn from(filter: &Filter) -> Self {
        Self {
            field: filter.field.clone(),
            operator: filter.operator,
            value: filter.value.clone(),
        }
    }
}

/// Which operators a data store can evaluate remotely. Anything else runs
/// locally over the fetched rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushdownCapability {
    unsupported: Vec<FilterOperator>,
}

impl Default for PushdownCapability {
    fn default() -> Self {
        Self::full()
    }
}

impl PushdownCapability {
    /// Every operator can be pushed down.
    pub fn full() -> Self {
        Self { unsupported: Vec::new() }
    }

    /// Nothing can be pushed down; all filtering happens locally.
    pub fn none() -> Self {
        Self {
            unsupported: vec![
                FilterOperator::Equals,
                FilterOperator::Contains,
                FilterOperator::GreaterThan,
                FilterOperator::LessThan,
            ],
        }
    }

    pub fn without(mut self, operator: FilterOperator) -> Self {
        if !self.unsupported.contains(&operator) {
            self.unsupported.push(operator);
        }
        self
    }

    pub fn supports(&self, operator: FilterOperator) -> bool {
        !self.unsupported.contains(&operator)
    }
}

/// Result of splitting a definition's filters: clauses the store evaluates,
/// filters applied locally on fetched rows, and filters rejected because
/// their field is not in the catalog. Pushdown and local AND together;
/// rejected filters are excluded from execution and surfaced to the caller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterSplit {
    pub pushdown: Vec<PushdownClause>,
    pub local: Vec<Filter>,
    pub rejected: Vec<Filter>,
}

/// Validate filters against the catalog and route each to the pushdown or
/// the local path. Inert filters (empty value) are dropped silently.
pub fn split_filters(
    filters: &[Filter],
    catalog: &FieldCatalog,
    capability: &PushdownCapability,
) -> FilterSplit {
    let mut split = FilterSplit::default();

    for filter in filters {
        if filter.is_inert() {
            continue;
        }
        if !catalog.contains(&filter.field) {
            split.rejected.push(filter.clone());
            continue;
        }
        if capability.supports(filter.operator) {
            split.pushdown.push(PushdownClause::from(filter));
        } else {
            split.local.push(filter.clone());
        }
    }

    split
}
