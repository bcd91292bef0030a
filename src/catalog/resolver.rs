use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::{
    EngineConfig, ReportError, ReportWarning,
    catalog::{FieldDefinition, FieldKind, FieldRegistry, builtin_fields},
};

/// The selectable columns of an entity: built-ins first, then custom fields,
/// keyed by field key so duplicates are structurally impossible. Warnings
/// collected while resolving (partial catalog, shadowed custom keys) travel
/// with the catalog.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    pub entity: String,
    fields: IndexMap<String, FieldDefinition>,
    pub warnings: Vec<ReportWarning>,
}

impl FieldCatalog {
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    /// Fields in catalog order (built-ins first, custom fields after).
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Resolves the field catalog for an entity: the built-in table merged with
/// prefixed custom fields from the injected registry.
pub struct CatalogResolver {
    registry: Arc<dyn FieldRegistry>,
    config: EngineConfig,
}

impl CatalogResolver {
    pub fn new(registry: Arc<dyn FieldRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Arc<dyn FieldRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Resolve the catalog for `entity`.
    ///
    /// Unknown entities are a hard error: an empty list would be
    /// indistinguishable from "no fields loaded yet". A registry failure is
    /// not: the catalog degrades to built-ins and carries a
    /// `PartialCatalog` warning.
    pub fn resolve(&self, entity: &str) -> Result<FieldCatalog, ReportError> {
        let built_ins = builtin_fields(entity)
            .ok_or_else(|| ReportError::UnknownEntity(entity.to_string()))?;

        let mut fields: IndexMap<String, FieldDefinition> = IndexMap::new();
        for def in built_ins {
            fields.insert(def.key.clone(), def.clone());
        }

        let mut warnings = Vec::new();
        match self.registry.list_fields(entity) {
            Ok(custom) => {
                for mut def in custom {
                    def.kind = FieldKind::Custom;
                    if !def.key.starts_with(&self.config.custom_field_prefix) {
                        def.key = format!("{}{}", self.config.custom_field_prefix, def.key);
                    }
                    if fields.contains_key(&def.key) {
                        warn!(entity, key = %def.key, "custom field shadows an existing field, skipping");
                        warnings.push(ReportWarning::ShadowedCustomField { key: def.key });
                        continue;
                    }
                    fields.insert(def.key.clone(), def);
                }
            }
            Err(err) => {
                warn!(entity, error = %err, "custom field registry unavailable, using built-ins only");
                warnings.push(ReportWarning::PartialCatalog {
                    entity: entity.to_string(),
                    detail: err.to_string(),
                });
            }
        }

        Ok(FieldCatalog {
            entity: entity.to_string(),
            fields,
            warnings,
        })
    }
}
