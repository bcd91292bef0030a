/// Engine configuration shared by the catalog resolver and the executor.
///
/// - `custom_field_prefix` namespaces custom field keys away from built-ins.
/// - `unknown_group_label` is the sentinel group key for rows whose group-by
///   value is null or missing.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Prefix applied to custom field keys before they enter a catalog
    pub custom_field_prefix: String,
    /// Group label used when the group-by value is null or missing
    pub unknown_group_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            custom_field_prefix: "custom_".to_string(),
            unknown_group_label: "Unknown".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with an explicit prefix and sentinel label.
    pub fn from(custom_field_prefix: &str, unknown_group_label: &str) -> Self {
        Self {
            custom_field_prefix: custom_field_prefix.to_string(),
            unknown_group_label: unknown_group_label.to_string(),
        }
    }
}
