//! Field schema registry
//!
//! Immutable mapping from field identifier to its declared type, built once
//! at startup and shared read-only (typically behind an `Arc`).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldSchemaEntry, FieldType, Operator};

/// Registry of filterable fields
#[derive(Debug, Clone)]
pub struct FieldSchemaRegistry {
    /// Entries in declaration order
    entries: Vec<FieldSchemaEntry>,
    /// Field identifier -> position in `entries`
    index: HashMap<String, usize>,
}

impl FieldSchemaRegistry {
    /// Builds a registry, rejecting duplicate fields and select fields
    /// without options.
    pub fn new(entries: Vec<FieldSchemaEntry>) -> SchemaResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            if entry.field_type.requires_options() && entry.options.is_none() {
                return Err(SchemaError::MissingOptions {
                    field: entry.field.clone(),
                    field_type: entry.field_type.type_name(),
                });
            }
            if index.insert(entry.field.clone(), pos).is_some() {
                return Err(SchemaError::DuplicateField(entry.field.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Loads a registry from a JSON array of entries.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let load_failed = |reason: String| SchemaError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path)
            .map_err(|e| load_failed(format!("Failed to read file: {}", e)))?;
        let entries: Vec<FieldSchemaEntry> = serde_json::from_str(&content)
            .map_err(|e| load_failed(format!("Invalid JSON: {}", e)))?;

        Self::new(entries)
    }

    /// The built-in employee directory schema.
    pub fn employees() -> Self {
        let entries = vec![
            FieldSchemaEntry::new("name", "Name", FieldType::Text),
            FieldSchemaEntry::new("email", "Email", FieldType::Text),
            FieldSchemaEntry::new("department", "Department", FieldType::SingleSelect)
                .with_options(["Engineering", "HR", "Finance", "Marketing"]),
            FieldSchemaEntry::new("role", "Role", FieldType::Text),
            FieldSchemaEntry::new("salary", "Salary", FieldType::Currency),
            FieldSchemaEntry::new("joinDate", "Join Date", FieldType::Date),
            FieldSchemaEntry::new("isActive", "Active", FieldType::Boolean),
            FieldSchemaEntry::new("skills", "Skills", FieldType::MultiSelect)
                .with_options(["React", "TypeScript", "Node.js", "GraphQL"]),
            FieldSchemaEntry::new("address.city", "City", FieldType::Text),
            FieldSchemaEntry::new("projects", "Projects", FieldType::Number),
            FieldSchemaEntry::new("performanceRating", "Performance Rating", FieldType::Number),
        ];

        // Static table: fields are unique and select fields carry options.
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.field.clone(), pos))
            .collect();
        Self { entries, index }
    }

    /// Looks up a field by identifier
    pub fn lookup(&self, field: &str) -> Option<&FieldSchemaEntry> {
        self.index.get(field).map(|&pos| &self.entries[pos])
    }

    /// The closed operator set for a type
    pub fn operators_for(&self, field_type: FieldType) -> &'static [Operator] {
        field_type.operators()
    }

    /// Whether `operator` names a legal operator for `field`.
    ///
    /// Unknown fields and unknown operator names are never supported.
    pub fn supports(&self, field: &str, operator: &str) -> bool {
        match (self.lookup(field), Operator::parse(operator)) {
            (Some(entry), Some(op)) => entry.field_type.supports(op),
            _ => false,
        }
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[FieldSchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_employee_lookup() {
        let registry = FieldSchemaRegistry::employees();

        let city = registry.lookup("address.city").unwrap();
        assert_eq!(city.field_type, FieldType::Text);
        assert_eq!(city.label, "City");

        let dept = registry.lookup("department").unwrap();
        assert_eq!(dept.options.as_ref().unwrap().len(), 4);

        assert!(registry.lookup("address").is_none());
        assert!(registry.lookup("unknown").is_none());
    }

    #[test]
    fn test_supports() {
        let registry = FieldSchemaRegistry::employees();

        assert!(registry.supports("salary", "between"));
        assert!(!registry.supports("salary", "gt"));
        assert!(registry.supports("skills", "notIn"));
        assert!(!registry.supports("skills", "bogus"));
        assert!(!registry.supports("nope", "equals"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = FieldSchemaRegistry::new(vec![
            FieldSchemaEntry::new("name", "Name", FieldType::Text),
            FieldSchemaEntry::new("name", "Other", FieldType::Number),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateField(f)) if f == "name"));
    }

    #[test]
    fn test_select_without_options_rejected() {
        let result = FieldSchemaRegistry::new(vec![FieldSchemaEntry::new(
            "team",
            "Team",
            FieldType::SingleSelect,
        )]);
        assert!(matches!(result, Err(SchemaError::MissingOptions { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.json");
        fs::write(
            &path,
            r#"[
                {"field": "title", "label": "Title", "type": "text"},
                {"field": "tags", "label": "Tags", "type": "multiSelect", "options": ["a", "b"]}
            ]"#,
        )
        .unwrap();

        let registry = FieldSchemaRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("tags").unwrap().field_type, FieldType::MultiSelect);
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.json");
        fs::write(&path, "{not json").unwrap();

        let err = FieldSchemaRegistry::load(&path).unwrap_err();
        assert_eq!(err.code(), "SCHEMA_LOAD_FAILED");
    }
}
