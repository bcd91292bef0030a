use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::ReportDefinition;

/// A persisted report: the declarative definition plus the identity the
/// persistence store assigned on insert. Never mutated after creation;
/// saving again inserts a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub definition: ReportDefinition,
}
