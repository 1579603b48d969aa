//! Structural validation of filter conditions
//!
//! Validation is a pure function of the condition and the schema. It is
//! recomputed on every evaluation and never cached. An invalid condition is
//! not an error: it becomes a per-condition diagnostic and is excluded from
//! evaluation and compilation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::coerce::{bound_date, bound_number};
use super::condition::FilterCondition;
use crate::schema::{FieldSchemaRegistry, FieldType, Operator};

/// Why a condition is structurally invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("Incomplete filter")]
    Incomplete,

    /// Field not in the registry. Carries no user-facing message.
    #[error("Unknown field")]
    UnknownField,

    #[error("Value required")]
    ValueRequired,

    #[error("Range required")]
    RangeRequired,

    #[error("Both min and max required")]
    BothBoundsRequired,

    #[error("Min cannot exceed Max")]
    MinExceedsMax,

    #[error("Date range required")]
    DateRangeRequired,

    #[error("Both dates required")]
    BothDatesRequired,

    #[error("Start date must be before End")]
    StartAfterEnd,

    #[error("Date required")]
    DateRequired,

    #[error("Select at least one option")]
    NoOptionSelected,

    #[error("Unsupported operator")]
    UnsupportedOperator,

    /// Element is not a condition object or its value has no known shape
    #[error("Malformed filter")]
    Malformed,
}

impl ConditionError {
    /// The message shown next to the condition, if any
    pub fn message(&self) -> Option<String> {
        match self {
            ConditionError::UnknownField => None,
            other => Some(other.to_string()),
        }
    }
}

/// Outcome of validating one condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }
}

impl From<Result<(), ConditionError>> for ValidationResult {
    fn from(result: Result<(), ConditionError>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(e) => Self {
                is_valid: false,
                error: e.message(),
            },
        }
    }
}

/// Diagnostic for a condition excluded from evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDiagnostic {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Conditions split into the evaluable subset and the rest
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub valid: Vec<FilterCondition>,
    pub invalid: Vec<ConditionDiagnostic>,
}

/// Decodes a list of loosely typed condition objects one element at a time.
///
/// An element that does not deserialize is reported as a diagnostic,
/// carrying its `id` when it has a string one and its list position
/// otherwise. The rest of the list is unaffected.
pub fn decode_conditions(items: Vec<Value>) -> (Vec<FilterCondition>, Vec<ConditionDiagnostic>) {
    let mut conditions = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("#{}", position), str::to_string);

        match serde_json::from_value::<FilterCondition>(item) {
            Ok(condition) => conditions.push(condition),
            Err(_) => rejected.push(ConditionDiagnostic {
                id,
                error: ConditionError::Malformed.message(),
            }),
        }
    }

    (conditions, rejected)
}

/// Validates conditions against a field schema
pub struct ConditionValidator<'a> {
    registry: &'a FieldSchemaRegistry,
}

impl<'a> ConditionValidator<'a> {
    pub fn new(registry: &'a FieldSchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validates a single condition
    pub fn validate(&self, condition: &FilterCondition) -> ValidationResult {
        self.check(condition).into()
    }

    /// Splits conditions into valid ones (in input order) and diagnostics
    pub fn partition(&self, conditions: &[FilterCondition]) -> Partition {
        let mut partition = Partition::default();

        for condition in conditions {
            match self.check(condition) {
                Ok(()) => partition.valid.push(condition.clone()),
                Err(e) => partition.invalid.push(ConditionDiagnostic {
                    id: condition.id.clone(),
                    error: e.message(),
                }),
            }
        }

        partition
    }

    /// Applies the structural rules in order
    pub fn check(&self, condition: &FilterCondition) -> Result<(), ConditionError> {
        if !condition.is_complete() {
            return Err(ConditionError::Incomplete);
        }

        let entry = self
            .registry
            .lookup(&condition.field)
            .ok_or(ConditionError::UnknownField)?;

        let value = &condition.value;

        match entry.field_type {
            FieldType::Text | FieldType::Number | FieldType::SingleSelect => {
                if value.is_empty() {
                    return Err(ConditionError::ValueRequired);
                }
            }

            FieldType::Currency => {
                let (min, max) = value.range().ok_or(ConditionError::RangeRequired)?;
                if min.is_none() || max.is_none() {
                    return Err(ConditionError::BothBoundsRequired);
                }
                if let (Some(min), Some(max)) = (bound_number(min), bound_number(max)) {
                    if min > max {
                        return Err(ConditionError::MinExceedsMax);
                    }
                }
            }

            FieldType::Date => {
                if condition.operator == Operator::Between.as_str() {
                    let (start, end) = value.range().ok_or(ConditionError::DateRangeRequired)?;
                    if start.is_none() || end.is_none() {
                        return Err(ConditionError::BothDatesRequired);
                    }
                    if let (Some(start), Some(end)) = (bound_date(start), bound_date(end)) {
                        if start > end {
                            return Err(ConditionError::StartAfterEnd);
                        }
                    }
                } else if value.is_empty() {
                    return Err(ConditionError::DateRequired);
                }
            }

            FieldType::MultiSelect => {
                if value.options().map_or(true, |items| items.is_empty()) {
                    return Err(ConditionError::NoOptionSelected);
                }
            }

            FieldType::Boolean => {}
        }

        // Schema operator membership is authoritative
        match Operator::parse(&condition.operator) {
            Some(op) if entry.field_type.supports(op) => Ok(()),
            _ => Err(ConditionError::UnsupportedOperator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterValue;

    fn validate(condition: FilterCondition) -> ValidationResult {
        let registry = FieldSchemaRegistry::employees();
        ConditionValidator::new(&registry).validate(&condition)
    }

    fn error_of(condition: FilterCondition) -> Option<String> {
        let result = validate(condition);
        assert!(!result.is_valid);
        result.error
    }

    #[test]
    fn test_decode_keeps_well_formed_elements() {
        let items = vec![
            serde_json::json!({"id": "a", "field": "department", "operator": "is", "value": "HR"}),
            serde_json::json!({"id": "b", "field": "salary", "operator": "between", "value": [1, 2, 3]}),
            serde_json::json!({"field": "salary", "operator": "between", "value": {"min": 1}}),
            serde_json::json!("department"),
        ];

        let (conditions, rejected) = decode_conditions(items);

        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].id, "a");
        let ids: Vec<&str> = rejected.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "#2", "#3"]);
        assert!(rejected
            .iter()
            .all(|d| d.error.as_deref() == Some("Malformed filter")));
    }

    #[test]
    fn test_incomplete_filter() {
        let cond = FilterCondition::new("", "equals", "x");
        assert_eq!(error_of(cond), Some("Incomplete filter".to_string()));

        let cond = FilterCondition::new("name", "", "x");
        assert_eq!(error_of(cond), Some("Incomplete filter".to_string()));
    }

    #[test]
    fn test_unknown_field_has_no_message() {
        let cond = FilterCondition::new("nickname", "equals", "x");
        assert_eq!(error_of(cond), None);
    }

    #[test]
    fn test_scalar_value_required() {
        for (field, op) in [("name", "contains"), ("projects", "gt"), ("department", "is")] {
            let cond = FilterCondition::new(field, op, "");
            assert_eq!(error_of(cond), Some("Value required".to_string()));

            let cond = FilterCondition::new(field, op, FilterValue::Empty);
            assert_eq!(error_of(cond), Some("Value required".to_string()));
        }

        assert!(validate(FilterCondition::new("projects", "gte", 3.0)).is_valid);
    }

    #[test]
    fn test_currency_rules() {
        let cond = FilterCondition::new("salary", "between", 5.0);
        assert_eq!(error_of(cond), Some("Range required".to_string()));

        let cond = FilterCondition::number_range("salary", "between", Some(10.0), None);
        assert_eq!(error_of(cond), Some("Both min and max required".to_string()));

        let cond = FilterCondition::number_range("salary", "between", Some(90.0), Some(10.0));
        assert_eq!(error_of(cond), Some("Min cannot exceed Max".to_string()));

        let cond = FilterCondition::number_range("salary", "between", Some(10.0), Some(10.0));
        assert!(validate(cond).is_valid);

        let cond = FilterCondition::options("salary", "between", ["100", "200"]);
        assert!(validate(cond).is_valid);
    }

    #[test]
    fn test_date_rules() {
        let cond = FilterCondition::new("joinDate", "between", "2024-01-01");
        assert_eq!(error_of(cond), Some("Date range required".to_string()));

        let cond = FilterCondition::date_range("joinDate", "between", Some("2024-01-01"), None);
        assert_eq!(error_of(cond), Some("Both dates required".to_string()));

        let cond = FilterCondition::date_range(
            "joinDate",
            "between",
            Some("2024-06-01"),
            Some("2024-01-01"),
        );
        assert_eq!(error_of(cond), Some("Start date must be before End".to_string()));

        let cond = FilterCondition::new("joinDate", "before", "");
        assert_eq!(error_of(cond), Some("Date required".to_string()));

        assert!(validate(FilterCondition::new("joinDate", "after", "2024-01-01")).is_valid);
    }

    #[test]
    fn test_multiselect_requires_option() {
        let cond = FilterCondition::options("skills", "in", Vec::<String>::new());
        assert_eq!(error_of(cond), Some("Select at least one option".to_string()));

        let cond = FilterCondition::new("skills", "in", "React");
        assert_eq!(error_of(cond), Some("Select at least one option".to_string()));

        assert!(validate(FilterCondition::options("skills", "notIn", ["React"])).is_valid);
    }

    #[test]
    fn test_boolean_always_valid() {
        assert!(validate(FilterCondition::new("isActive", "is", true)).is_valid);
        assert!(validate(FilterCondition::new("isActive", "is", FilterValue::Empty)).is_valid);
    }

    #[test]
    fn test_operator_membership_is_authoritative() {
        let cond = FilterCondition::new("name", "gt", "a");
        assert_eq!(error_of(cond), Some("Unsupported operator".to_string()));

        let cond = FilterCondition::new("isActive", "isNot", true);
        assert_eq!(error_of(cond), Some("Unsupported operator".to_string()));
    }

    #[test]
    fn test_partition_keeps_order() {
        let registry = FieldSchemaRegistry::employees();
        let validator = ConditionValidator::new(&registry);

        let conditions = vec![
            FilterCondition::new("name", "contains", "a").with_id("1"),
            FilterCondition::new("name", "contains", "").with_id("2"),
            FilterCondition::new("role", "equals", "Manager").with_id("3"),
        ];

        let partition = validator.partition(&conditions);
        let ids: Vec<_> = partition.valid.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(partition.invalid.len(), 1);
        assert_eq!(partition.invalid[0].id, "2");
        assert_eq!(partition.invalid[0].error.as_deref(), Some("Value required"));
    }

    #[test]
    fn test_validation_result_serde() {
        let json = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(json, serde_json::json!({"isValid": true}));
    }
}
