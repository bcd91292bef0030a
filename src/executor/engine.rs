use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    EngineConfig, ReportError, ReportWarning, ResultRow,
    aggregate::aggregate,
    catalog::{CatalogResolver, FieldCatalog, FieldRegistry},
    executor::EntityDataStore,
    filter::{Filter, FilterSplit, apply_local, split_filters},
    store::{PersistenceStore, ReportDefinition, ReportStore, SavedReport},
};

/// Result of one execution: the rows, the effective column list (which for
/// grouped reports differs from the requested columns by design), and the
/// degradations the caller should surface to the user.
#[derive(Debug, Clone, Default)]
pub struct ReportOutput {
    pub rows: Vec<ResultRow>,
    pub columns: Vec<String>,
    pub rejected_filters: Vec<Filter>,
    pub warnings: Vec<ReportWarning>,
}

/// The report query executor: an explicitly constructed service holding its
/// three collaborators. It keeps no state between executions; concurrent
/// `execute` calls are independent.
///
/// Pipeline per call:
/// `Validate -> ResolveCatalog -> BuildFilters -> FetchRows -> Aggregate | Finalize`
/// with exactly one suspension point, the data store fetch. Everything
/// before the fetch fails without issuing any I/O.
pub struct ReportEngine {
    data_store: Arc<dyn EntityDataStore>,
    catalog: CatalogResolver,
    reports: ReportStore,
    config: EngineConfig,
}

impl ReportEngine {
    pub fn new(
        data_store: Arc<dyn EntityDataStore>,
        field_registry: Arc<dyn FieldRegistry>,
        persistence: Arc<dyn PersistenceStore>,
    ) -> Self {
        Self::with_config(data_store, field_registry, persistence, EngineConfig::default())
    }

    pub fn with_config(
        data_store: Arc<dyn EntityDataStore>,
        field_registry: Arc<dyn FieldRegistry>,
        persistence: Arc<dyn PersistenceStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            data_store,
            catalog: CatalogResolver::with_config(field_registry, config.clone()),
            reports: ReportStore::new(persistence),
            config,
        }
    }

    /// Resolve the selectable columns for an entity, for definition UIs.
    pub fn resolve_catalog(&self, entity: &str) -> Result<FieldCatalog, ReportError> {
        self.catalog.resolve(entity)
    }

    /// Execute a report definition against the data store.
    pub async fn execute(&self, definition: &ReportDefinition) -> Result<ReportOutput, ReportError> {
        // Validate: fail fast before any I/O
        if definition.entity.trim().is_empty() {
            return Err(ReportError::InvalidDefinition("entity is required".into()));
        }
        if definition.columns.is_empty() {
            return Err(ReportError::InvalidDefinition("at least one column is required".into()));
        }

        // ResolveCatalog
        let catalog = self.catalog.resolve(&definition.entity)?;
        let mut warnings = catalog.warnings.clone();
        let columns = Self::validate_columns(&definition.columns, &catalog, &mut warnings)?;

        // BuildFilters
        let split = split_filters(
            &definition.filters,
            &catalog,
            &self.data_store.pushdown_capability(),
        );

        // FetchRows: the single I/O call of the pipeline
        let fetch_columns = Self::fetch_columns(&columns, definition, &split);
        debug!(
            entity = %definition.entity,
            columns = fetch_columns.len(),
            pushdown = split.pushdown.len(),
            local = split.local.len(),
            "fetching rows"
        );
        let fetched = self
            .data_store
            .fetch(&definition.entity, &fetch_columns, &split.pushdown)
            .await
            .map_err(|e| ReportError::DataSource(e.to_string()))?;
        debug!(rows = fetched.len(), "fetched");

        // Aggregate when grouping is requested, Finalize otherwise
        let (rows, columns) = match &definition.group_by {
            Some(group_by) => {
                let filtered = apply_local(&split.local, fetched);
                let grouped = aggregate(
                    &filtered,
                    group_by,
                    &definition.aggregations,
                    &self.config.unknown_group_label,
                );
                let mut grouped_columns = vec![group_by.clone()];
                for agg in &definition.aggregations {
                    let key = agg.output_key();
                    if !grouped_columns.contains(&key) {
                        grouped_columns.push(key);
                    }
                }
                (grouped, grouped_columns)
            }
            None => {
                let mut rows = apply_local(&split.local, fetched);
                // strip fields that were fetched only for local filtering
                if fetch_columns.len() > columns.len() {
                    for row in &mut rows {
                        row.retain(|key, _| columns.contains(key));
                    }
                }
                (rows, columns)
            }
        };

        Ok(ReportOutput {
            rows,
            columns,
            rejected_filters: split.rejected,
            warnings,
        })
    }

    /// Drop requested columns the catalog does not know (and duplicates).
    /// An empty remainder is fatal: the report would have no shape at all.
    fn validate_columns(
        requested: &[String],
        catalog: &FieldCatalog,
        warnings: &mut Vec<ReportWarning>,
    ) -> Result<Vec<String>, ReportError> {
        let mut columns: Vec<String> = Vec::new();
        for column in requested {
            if !catalog.contains(column) {
                warn!(column = %column, entity = %catalog.entity, "requested column not in catalog, dropping");
                warnings.push(ReportWarning::UnknownColumn { column: column.clone() });
                continue;
            }
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        if columns.is_empty() {
            return Err(ReportError::NoValidColumns);
        }
        Ok(columns)
    }

    /// The column set the single fetch requests: the validated columns plus,
    /// when grouping, the group-by column and aggregation source fields, plus
    /// any fields local filters read. Local evaluation and grouping need
    /// those values present in the fetched rows.
    fn fetch_columns(
        columns: &[String],
        definition: &ReportDefinition,
        split: &FilterSplit,
    ) -> Vec<String> {
        let mut fetch_columns = columns.to_vec();
        let push = |column: &String, fetch_columns: &mut Vec<String>| {
            if !fetch_columns.contains(column) {
                fetch_columns.push(column.clone());
            }
        };

        if let Some(group_by) = &definition.group_by {
            push(group_by, &mut fetch_columns);
            for agg in &definition.aggregations {
                push(&agg.field, &mut fetch_columns);
            }
        }
        for filter in &split.local {
            push(&filter.field, &mut fetch_columns);
        }

        fetch_columns
    }

    // ---- Saved reports (delegates to the definition store) ----

    pub fn save_report(&self, definition: &ReportDefinition) -> Result<SavedReport, ReportError> {
        self.reports.save(definition)
    }

    pub fn list_reports(&self) -> Result<Vec<SavedReport>, ReportError> {
        self.reports.list()
    }

    pub fn load_report(&self, id: &str) -> Result<ReportDefinition, ReportError> {
        self.reports.load(id)
    }
}
