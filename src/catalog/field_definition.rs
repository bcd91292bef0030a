use serde::{Deserialize, Serialize};

/// Origin of a selectable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Shipped with the entity definition
    BuiltIn,
    /// Declared by a user through the custom field registry
    Custom,
}

/// A selectable column of an entity. `key` is unique within an entity's
/// catalog; `label` is the display name the presentation layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn built_in(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: FieldKind::BuiltIn,
        }
    }

    pub fn custom(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: FieldKind::Custom,
        }
    }
}
