use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::catalog::FieldDefinition;

/// Built-in field tables for the closed set of supported entities.
///
/// The set itself is the configuration: an entity is reportable exactly when
/// it has an entry here. Custom fields are merged on top by the resolver.
static BUILTIN_FIELDS: Lazy<IndexMap<&'static str, Vec<FieldDefinition>>> = Lazy::new(|| {
    let mut entities = IndexMap::new();

    entities.insert("companies", vec![
        FieldDefinition::built_in("id", "Id"),
        FieldDefinition::built_in("name", "Name"),
        FieldDefinition::built_in("industry", "Industry"),
        FieldDefinition::built_in("revenue", "Revenue"),
        FieldDefinition::built_in("employees", "Employees"),
        FieldDefinition::built_in("city", "City"),
        FieldDefinition::built_in("country", "Country"),
        FieldDefinition::built_in("created_at", "Created at"),
    ]);

    entities.insert("contacts", vec![
        FieldDefinition::built_in("id", "Id"),
        FieldDefinition::built_in("first_name", "First name"),
        FieldDefinition::built_in("last_name", "Last name"),
        FieldDefinition::built_in("email", "Email"),
        FieldDefinition::built_in("phone", "Phone"),
        FieldDefinition::built_in("company_id", "Company"),
        FieldDefinition::built_in("created_at", "Created at"),
    ]);

    entities.insert("deals", vec![
        FieldDefinition::built_in("id", "Id"),
        FieldDefinition::built_in("title", "Title"),
        FieldDefinition::built_in("stage", "Stage"),
        FieldDefinition::built_in("amount", "Amount"),
        FieldDefinition::built_in("company_id", "Company"),
        FieldDefinition::built_in("contact_id", "Contact"),
        FieldDefinition::built_in("closed_at", "Closed at"),
        FieldDefinition::built_in("created_at", "Created at"),
    ]);

    entities.insert("activities", vec![
        FieldDefinition::built_in("id", "Id"),
        FieldDefinition::built_in("kind", "Kind"),
        FieldDefinition::built_in("subject", "Subject"),
        FieldDefinition::built_in("due_at", "Due at"),
        FieldDefinition::built_in("done", "Done"),
        FieldDefinition::built_in("contact_id", "Contact"),
        FieldDefinition::built_in("created_at", "Created at"),
    ]);

    entities
});

/// Built-in fields for `entity`, or `None` when the entity is not supported.
pub fn builtin_fields(entity: &str) -> Option<&'static [FieldDefinition]> {
    BUILTIN_FIELDS.get(entity).map(Vec::as_slice)
}

/// The supported entity names, in declaration order.
pub fn known_entities() -> Vec<&'static str> {
    BUILTIN_FIELDS.keys().copied().collect()
}
