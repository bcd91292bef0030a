use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::{
    ResultRow,
    filter::{PushdownCapability, PushdownClause, eval_operator},
};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct DataSourceError(pub String);

/// The entity data store boundary — the engine's only I/O surface.
///
/// `fetch` returns at most one store-defined page of rows for `entity`,
/// projected to `columns`, with `filters` already applied remotely.
/// `pushdown_capability` advertises which operators the store can evaluate;
/// the engine runs the rest locally over the returned rows.
#[async_trait]
pub trait EntityDataStore: Send + Sync {
    async fn fetch(
        &self,
        entity: &str,
        columns: &[String],
        filters: &[PushdownClause],
    ) -> Result<Vec<ResultRow>, DataSourceError>;

    fn pushdown_capability(&self) -> PushdownCapability {
        PushdownCapability::full()
    }
}

/// In-memory entity data store for tests and prototyping.
///
/// Tables are plain row vectors behind a `RwLock`; `fetch` evaluates
/// pushdown clauses with the same operator semantics the local path uses,
/// so both dialects agree, and returns rows in table order.
#[derive(Default)]
pub struct MemoryDataStore {
    tables: RwLock<HashMap<String, Vec<ResultRow>>>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of objects as the rows of `entity`, replacing any
    /// previous contents. Non-object elements are skipped.
    pub fn load_table(&self, entity: &str, rows: Value) -> usize {
        let rows: Vec<ResultRow> = match rows {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        let count = rows.len();
        self.tables.write().unwrap().insert(entity.to_string(), rows);
        count
    }
}

#[async_trait]
impl EntityDataStore for MemoryDataStore {
    async fn fetch(
        &self,
        entity: &str,
        columns: &[String],
        filters: &[PushdownClause],
    ) -> Result<Vec<ResultRow>, DataSourceError> {
        let tables = self.tables.read().unwrap();
        let rows = tables
            .get(entity)
            .ok_or_else(|| DataSourceError(format!("no table for entity {entity}")))?;

        let out = rows
            .iter()
            .filter(|row| {
                filters.iter().all(|clause| {
                    row.get(&clause.field)
                        .is_some_and(|actual| eval_operator(clause.operator, actual, &clause.value))
                })
            })
            .map(|row| {
                let mut projected = ResultRow::new();
                for column in columns {
                    let value = row.get(column).cloned().unwrap_or(Value::Null);
                    projected.insert(column.clone(), value);
                }
                projected
            })
            .collect();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::filter::FilterOperator;

    fn store_with_rows() -> MemoryDataStore {
        let store = MemoryDataStore::new();
        store.load_table(
            "companies",
            json!([
                { "id": 1, "name": "Acme Labs", "industry": "Tech", "revenue": 1200.5 },
                { "id": 2, "name": "Bolt Retail", "industry": "Retail", "revenue": 900.0 },
                { "id": 3, "name": "Crate Works", "industry": "Tech", "revenue": null }
            ]),
        );
        store
    }

    #[tokio::test]
    async fn fetch_applies_clauses_and_projects_columns() {
        let store = store_with_rows();
        let clauses = vec![PushdownClause {
            field: "industry".into(),
            operator: FilterOperator::Equals,
            value: "Tech".into(),
        }];

        let rows = store
            .fetch("companies", &["name".into(), "revenue".into()], &clauses)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("Acme Labs"));
        assert_eq!(rows[1]["revenue"], Value::Null);
        assert!(rows[0].get("industry").is_none());
    }

    #[tokio::test]
    async fn fetch_preserves_table_order() {
        let store = store_with_rows();
        let rows = store.fetch("companies", &["id".into()], &[]).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    }

    #[tokio::test]
    async fn fetch_unknown_entity_is_a_store_error() {
        let store = MemoryDataStore::new();
        let err = store.fetch("ghosts", &["id".into()], &[]).await.unwrap_err();
        assert!(err.to_string().contains("ghosts"));
    }

    #[tokio::test]
    async fn non_object_elements_are_skipped_on_load() {
        let store = MemoryDataStore::new();
        let count = store.load_table("companies", json!([{ "id": 1 }, 42, "x"]));
        assert_eq!(count, 1);
    }
}
