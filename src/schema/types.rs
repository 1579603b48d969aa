//! Field schema type definitions
//!
//! Supported field types:
//! - text: free-form string, case-insensitive matching
//! - number: numeric comparison
//! - date: calendar instant comparison
//! - currency: inclusive numeric range
//! - boolean: exact identity
//! - singleSelect: one of a fixed option list
//! - multiSelect: subset of a fixed option list

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter operators, across all field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    NotContains,
    Gt,
    Lt,
    Gte,
    Lte,
    Between,
    Before,
    After,
    Is,
    IsNot,
    In,
    NotIn,
}

impl Operator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::NotContains => "notContains",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Between => "between",
            Operator::Before => "before",
            Operator::After => "after",
            Operator::Is => "is",
            Operator::IsNot => "isNot",
            Operator::In => "in",
            Operator::NotIn => "notIn",
        }
    }

    /// Parse an operator name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let op = match name {
            "equals" => Operator::Equals,
            "contains" => Operator::Contains,
            "startsWith" => Operator::StartsWith,
            "endsWith" => Operator::EndsWith,
            "notContains" => Operator::NotContains,
            "gt" => Operator::Gt,
            "lt" => Operator::Lt,
            "gte" => Operator::Gte,
            "lte" => Operator::Lte,
            "between" => Operator::Between,
            "before" => Operator::Before,
            "after" => Operator::After,
            "is" => Operator::Is,
            "isNot" => Operator::IsNot,
            "in" => Operator::In,
            "notIn" => Operator::NotIn,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::Contains,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::NotContains,
];
const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::Gt,
    Operator::Lt,
    Operator::Gte,
    Operator::Lte,
];
const CURRENCY_OPERATORS: &[Operator] = &[Operator::Between];
const DATE_OPERATORS: &[Operator] = &[Operator::Between, Operator::Before, Operator::After];
const SINGLE_SELECT_OPERATORS: &[Operator] = &[Operator::Is, Operator::IsNot];
const MULTI_SELECT_OPERATORS: &[Operator] = &[Operator::In, Operator::NotIn];
const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Is];

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Currency,
    Boolean,
    SingleSelect,
    MultiSelect,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Currency => "currency",
            FieldType::Boolean => "boolean",
            FieldType::SingleSelect => "singleSelect",
            FieldType::MultiSelect => "multiSelect",
        }
    }

    /// The closed operator set for this type, in display order
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            FieldType::Text => TEXT_OPERATORS,
            FieldType::Number => NUMBER_OPERATORS,
            FieldType::Currency => CURRENCY_OPERATORS,
            FieldType::Date => DATE_OPERATORS,
            FieldType::SingleSelect => SINGLE_SELECT_OPERATORS,
            FieldType::MultiSelect => MULTI_SELECT_OPERATORS,
            FieldType::Boolean => BOOLEAN_OPERATORS,
        }
    }

    /// Whether `op` is legal for this type
    pub fn supports(&self, op: Operator) -> bool {
        self.operators().contains(&op)
    }

    /// Select types must declare their options
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldType::SingleSelect | FieldType::MultiSelect)
    }
}

/// A single filterable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchemaEntry {
    /// Dot-path identifier, unique per registry
    pub field: String,
    /// Display label
    pub label: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Enumerated values for select types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSchemaEntry {
    pub fn new(field: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            field_type,
            options: None,
        }
    }

    /// Attach an option list (select types)
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Operators legal for this field
    pub fn operators(&self) -> &'static [Operator] {
        self.field_type.operators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip_names() {
        for op in [
            Operator::Equals,
            Operator::StartsWith,
            Operator::NotContains,
            Operator::IsNot,
            Operator::NotIn,
        ] {
            assert_eq!(Operator::parse(op.as_str()), Some(op));
        }
        assert_eq!(Operator::parse("like"), None);
        assert_eq!(Operator::parse("Equals"), None);
    }

    #[test]
    fn test_operator_tables() {
        assert_eq!(
            FieldType::Text.operators(),
            &[
                Operator::Equals,
                Operator::Contains,
                Operator::StartsWith,
                Operator::EndsWith,
                Operator::NotContains
            ]
        );
        assert_eq!(FieldType::Currency.operators(), &[Operator::Between]);
        assert_eq!(FieldType::Boolean.operators(), &[Operator::Is]);
        assert!(FieldType::Date.supports(Operator::Before));
        assert!(!FieldType::Number.supports(Operator::Between));
        assert!(!FieldType::MultiSelect.supports(Operator::Is));
    }

    #[test]
    fn test_entry_serde_shape() {
        let entry = FieldSchemaEntry::new("skills", "Skills", FieldType::MultiSelect)
            .with_options(["React", "Rust"]);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "multiSelect");
        assert_eq!(json["options"][1], "Rust");

        let plain = FieldSchemaEntry::new("name", "Name", FieldType::Text);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("options").is_none());
    }
}
