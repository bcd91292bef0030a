use std::{collections::HashMap, sync::RwLock};

use thiserror::Error;

use crate::catalog::FieldDefinition;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct RegistryError(pub String);

/// Boundary to the custom field registry. Reads a small cached list per
/// entity; a failure here degrades the catalog to built-ins only, it never
/// fails a report.
pub trait FieldRegistry: Send + Sync {
    fn list_fields(&self, entity: &str) -> Result<Vec<FieldDefinition>, RegistryError>;
}

/// In-memory registry for tests and embedders without a backing service.
#[derive(Default)]
pub struct MemoryFieldRegistry {
    fields: RwLock<HashMap<String, Vec<FieldDefinition>>>,
}

impl MemoryFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a custom field for an entity. The resolver applies the key
    /// prefix; callers register bare keys.
    pub fn add_field(&self, entity: &str, key: &str, label: &str) {
        let mut fields = self.fields.write().unwrap();
        fields
            .entry(entity.to_string())
            .or_default()
            .push(FieldDefinition::custom(key, label));
    }
}

impl FieldRegistry for MemoryFieldRegistry {
    fn list_fields(&self, entity: &str) -> Result<Vec<FieldDefinition>, RegistryError> {
        let fields = self.fields.read().unwrap();
        Ok(fields.get(entity).cloned().unwrap_or_default())
    }
}
