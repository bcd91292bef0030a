use std::fmt::Display;

use thiserror::Error;

/// Fatal failures of the engine. Local validation kinds (`InvalidDefinition`,
/// `NoValidColumns`, `MissingName`) are always raised before any I/O.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("invalid report definition: {0}")]
    InvalidDefinition(String),
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("none of the requested columns exist for this entity")]
    NoValidColumns,
    #[error("data source failure: {0}")]
    DataSource(String),
    #[error("a report needs a name before it can be saved")]
    MissingName,
    #[error("no saved report with id {0}")]
    ReportNotFound(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

/// Non-fatal degradations. Warnings travel with the produced value
/// (catalog, report output) so callers can surface them; they are never
/// raised as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportWarning {
    /// The custom field registry was unavailable; the catalog holds
    /// built-in fields only.
    PartialCatalog { entity: String, detail: String },
    /// A requested column is absent from the entity catalog and was dropped.
    UnknownColumn { column: String },
    /// A custom field key collided with a built-in and was skipped.
    ShadowedCustomField { key: String },
}

impl Display for ReportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportWarning::PartialCatalog { entity, detail } => {
                write!(f, "custom fields for {entity} unavailable ({detail}); using built-in fields only")
            }
            ReportWarning::UnknownColumn { column } => {
                write!(f, "column {column} is not part of the entity catalog and was dropped")
            }
            ReportWarning::ShadowedCustomField { key } => {
                write!(f, "custom field {key} collides with a built-in field and was skipped")
            }
        }
    }
}
