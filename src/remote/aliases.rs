//! UI field path to backend column aliasing

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::get_path;

/// Static map from UI field path to backend column name.
///
/// Fields without an alias use their own path as the column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address paths of the employee directory collapse to flat columns
    pub fn employees() -> Self {
        Self::new()
            .with_alias("address.city", "city")
            .with_alias("address.state", "state")
            .with_alias("address.country", "country")
    }

    pub fn with_alias(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), column.into());
        self
    }

    /// Backend column for a UI field
    pub fn column<'a>(&'a self, field: &'a str) -> &'a str {
        self.aliases.get(field).map(String::as_str).unwrap_or(field)
    }

    /// Projects a nested record onto the flat row shape the backend stores:
    /// each aliased path is copied to its column. Other keys are kept.
    pub fn flatten(&self, record: &Value) -> Value {
        let mut row = record.clone();

        if let Some(object) = row.as_object_mut() {
            for (field, column) in &self.aliases {
                if let Some(value) = get_path(record, field) {
                    object.insert(column.clone(), value.clone());
                }
            }
        }

        row
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
