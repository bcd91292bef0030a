use std::sync::Arc;

use tracing::debug;

use crate::{
    ReportError,
    store::{PersistenceStore, ReportDefinition, SavedReport},
};

/// Serializes report definitions to and from the persistence store. Operates
/// independently of execution: only the declarative definition is persisted,
/// never result rows.
pub struct ReportStore {
    persistence: Arc<dyn PersistenceStore>,
}

impl ReportStore {
    pub fn new(persistence: Arc<dyn PersistenceStore>) -> Self {
        Self { persistence }
    }

    /// Persist a definition. Requires a non-empty name, checked before the
    /// store is contacted.
    pub fn save(&self, definition: &ReportDefinition) -> Result<SavedReport, ReportError> {
        if definition.name.trim().is_empty() {
            return Err(ReportError::MissingName);
        }
        let saved = self
            .persistence
            .insert(definition.clone())
            .map_err(|e| ReportError::Persistence(e.to_string()))?;
        debug!(id = %saved.id, name = %saved.definition.name, "report saved");
        Ok(saved)
    }

    pub fn list(&self) -> Result<Vec<SavedReport>, ReportError> {
        self.persistence
            .select_all()
            .map_err(|e| ReportError::Persistence(e.to_string()))
    }

    /// Load a saved definition by id. Purely deserialization: the definition
    /// is not re-validated against the current field catalog; staleness
    /// surfaces on the next execute through the normal degradation path.
    pub fn load(&self, id: &str) -> Result<ReportDefinition, ReportError> {
        self.list()?
            .into_iter()
            .find(|saved| saved.id == id)
            .map(|saved| saved.definition)
            .ok_or_else(|| ReportError::ReportNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPersistence;

    fn store() -> ReportStore {
        ReportStore::new(Arc::new(MemoryPersistence::new()))
    }

    #[test]
    fn save_without_name_fails_before_any_io() {
        let reports = store();
        let unnamed = ReportDefinition::new("companies", &["name"]);
        assert_eq!(reports.save(&unnamed).unwrap_err(), ReportError::MissingName);
        assert_eq!(reports.save(&unnamed.clone().named("  ")).unwrap_err(), ReportError::MissingName);
        assert!(reports.list().unwrap().is_empty());
    }

    #[test]
    fn load_returns_the_saved_definition() {
        let reports = store();
        let def = ReportDefinition::new("companies", &["name", "industry"]).named("all companies");
        let saved = reports.save(&def).unwrap();

        assert_eq!(reports.load(&saved.id).unwrap(), def);
    }

    #[test]
    fn load_does_not_validate_against_the_catalog() {
        let reports = store();
        // references a column that no catalog knows; still loads fine
        let stale = ReportDefinition::new("companies", &["long_gone_field"]).named("stale");
        let saved = reports.save(&stale).unwrap();

        let loaded = reports.load(&saved.id).unwrap();
        assert_eq!(loaded.columns, vec!["long_gone_field".to_string()]);
    }

    #[test]
    fn load_unknown_id_is_report_not_found() {
        let err = store().load("missing").unwrap_err();
        assert_eq!(err, ReportError::ReportNotFound("missing".into()));
    }

    #[test]
    fn saving_again_inserts_a_new_record() {
        let reports = store();
        let def = ReportDefinition::new("companies", &["name"]).named("v1");
        let first = reports.save(&def).unwrap();
        let second = reports.save(&def.clone().named("v2")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(reports.list().unwrap().len(), 2);
    }
}
