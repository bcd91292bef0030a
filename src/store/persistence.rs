use std::{fs, path::Path, sync::RwLock};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::store::{ReportDefinition, SavedReport};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct PersistenceError(pub String);

/// Boundary to the report persistence store. Insert assigns identity
/// (id, created_at); select_all returns every saved report in insertion
/// order. There is deliberately no point lookup or partial update.
pub trait PersistenceStore: Send + Sync {
    fn insert(&self, definition: ReportDefinition) -> Result<SavedReport, PersistenceError>;
    fn select_all(&self) -> Result<Vec<SavedReport>, PersistenceError>;
}

/// In-memory persistence with optional JSON file snapshots, for tests and
/// embedders without a backing database.
#[derive(Default)]
pub struct MemoryPersistence {
    reports: RwLock<Vec<SavedReport>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the JSON array snapshot at `path`.
    pub fn load_from_file(&self, path: &Path) -> Result<usize, PersistenceError> {
        // Guard: the file must be readable and hold a JSON array
        let content = fs::read_to_string(path)
            .map_err(|e| PersistenceError(format!("could not read {}: {e}", path.display())))?;
        let reports: Vec<SavedReport> = serde_json::from_str(&content)
            .map_err(|e| PersistenceError(format!("{} is not a report snapshot: {e}", path.display())))?;

        let count = reports.len();
        *self.reports.write().unwrap() = reports;
        debug!(count, path = %path.display(), "loaded report snapshot");
        Ok(count)
    }

    /// Write the current contents as a JSON array snapshot to `path`.
    pub fn persist_to_file(&self, path: &Path) -> Result<(), PersistenceError> {
        let reports = self.reports.read().unwrap();
        let content = serde_json::to_string_pretty(&*reports)
            .map_err(|e| PersistenceError(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| PersistenceError(format!("could not write {}: {e}", path.display())))
    }
}

impl PersistenceStore for MemoryPersistence {
    fn insert(&self, definition: ReportDefinition) -> Result<SavedReport, PersistenceError> {
        let saved = SavedReport {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            definition,
        };
        self.reports.write().unwrap().push(saved.clone());
        Ok(saved)
    }

    fn select_all(&self) -> Result<Vec<SavedReport>, PersistenceError> {
        Ok(self.reports.read().unwrap().clone())
    }
}
