//! Backend-native predicate representation
//!
//! A compiled predicate is an AND of per-column OR groups, the same shape
//! as the in-memory grouping law. Each leaf compares one column with a typed
//! operand. Text comparisons are case-insensitive and their operands are
//! stored lower-cased.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::filter::coerce::{date_of, number_of, overlaps, text_of};
use crate::filter::get_path;

/// Typed comparison operand
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
    Bool(bool),
}

/// Column comparison primitives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparison {
    /// Exact identity, no coercion
    Is(Operand),
    /// Negated exact identity
    IsNot(Operand),
    /// Column holds any non-null value
    Present,
    /// Coercing equality (numeric or date)
    Equals(Operand),
    TextEquals(String),
    Contains(String),
    NotContains(String),
    StartsWith(String),
    EndsWith(String),
    Gt(Operand),
    Gte(Operand),
    Lt(Operand),
    Lte(Operand),
    /// Inclusive range
    Between { gte: Operand, lte: Operand },
    /// Array column shares at least one element with the list
    HasSome(Vec<String>),
    /// Literal negation of `HasSome`
    NotHasSome(Vec<String>),
}

/// Compiled filter predicate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    /// Matches every row
    All,
    /// Matches no row
    None,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Column {
        column: String,
        comparison: Comparison,
    },
}

impl Predicate {
    pub fn column(column: impl Into<String>, comparison: Comparison) -> Self {
        Predicate::Column {
            column: column.into(),
            comparison,
        }
    }

    /// Evaluates the predicate against a flat row.
    ///
    /// A missing or null column fails every comparison, negated ones
    /// included.
    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Predicate::All => true,
            Predicate::None => false,
            Predicate::And(parts) => parts.iter().all(|p| p.matches(row)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(row)),
            Predicate::Column { column, comparison } => {
                get_path(row, column).is_some_and(|actual| comparison.matches(actual))
            }
        }
    }
}

impl Comparison {
    /// Evaluates against a present (non-null) column value
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Comparison::Is(operand) => is_identical(actual, operand),
            Comparison::IsNot(operand) => !is_identical(actual, operand),
            Comparison::Present => true,
            Comparison::Equals(operand) => {
                compare(actual, operand).is_some_and(|ord| ord.is_eq())
            }
            Comparison::TextEquals(needle) => text_of(actual).is_some_and(|t| t == *needle),
            Comparison::Contains(needle) => {
                text_of(actual).is_some_and(|t| t.contains(needle.as_str()))
            }
            Comparison::NotContains(needle) => {
                text_of(actual).is_some_and(|t| !t.contains(needle.as_str()))
            }
            Comparison::StartsWith(needle) => {
                text_of(actual).is_some_and(|t| t.starts_with(needle.as_str()))
            }
            Comparison::EndsWith(needle) => {
                text_of(actual).is_some_and(|t| t.ends_with(needle.as_str()))
            }
            Comparison::Gt(operand) => compare(actual, operand).is_some_and(|ord| ord.is_gt()),
            Comparison::Gte(operand) => compare(actual, operand).is_some_and(|ord| ord.is_ge()),
            Comparison::Lt(operand) => compare(actual, operand).is_some_and(|ord| ord.is_lt()),
            Comparison::Lte(operand) => compare(actual, operand).is_some_and(|ord| ord.is_le()),
            Comparison::Between { gte, lte } => {
                compare(actual, gte).is_some_and(|ord| ord.is_ge())
                    && compare(actual, lte).is_some_and(|ord| ord.is_le())
            }
            Comparison::HasSome(options) => overlaps(actual, options) == Some(true),
            Comparison::NotHasSome(options) => overlaps(actual, options) == Some(false),
        }
    }
}

fn is_identical(actual: &Value, operand: &Operand) -> bool {
    match (actual, operand) {
        (Value::String(a), Operand::Text(e)) => a == e,
        (Value::Bool(a), Operand::Bool(e)) => a == e,
        (Value::Number(a), Operand::Number(e)) => a.as_f64() == Some(*e),
        _ => false,
    }
}

/// Orders a column value against a numeric or date operand
fn compare(actual: &Value, operand: &Operand) -> Option<std::cmp::Ordering> {
    match operand {
        Operand::Number(n) => number_of(actual)?.partial_cmp(n),
        Operand::Date(d) => Some(date_of(actual)?.cmp(d)),
        Operand::Text(_) | Operand::Bool(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_comparisons() {
        let row = json!({"city": "Austin", "salary": "50", "skills": ["Rust"], "active": true});

        assert!(Predicate::column("city", Comparison::TextEquals("austin".into())).matches(&row));
        assert!(Predicate::column("city", Comparison::StartsWith("aus".into())).matches(&row));
        assert!(Predicate::column("salary", Comparison::Gte(Operand::Number(50.0))).matches(&row));
        assert!(!Predicate::column("salary", Comparison::Gt(Operand::Number(50.0))).matches(&row));
        assert!(Predicate::column("skills", Comparison::HasSome(vec!["Rust".into()])).matches(&row));
        assert!(Predicate::column("active", Comparison::Is(Operand::Bool(true))).matches(&row));
        assert!(!Predicate::column("active", Comparison::Is(Operand::Text("true".into()))).matches(&row));
    }

    #[test]
    fn test_missing_column_fails_negations() {
        let row = json!({"city": null});

        assert!(!Predicate::column("city", Comparison::NotContains("x".into())).matches(&row));
        assert!(!Predicate::column("city", Comparison::IsNot(Operand::Text("x".into()))).matches(&row));
        assert!(!Predicate::column("tags", Comparison::NotHasSome(vec!["x".into()])).matches(&row));
        assert!(!Predicate::column("city", Comparison::Present).matches(&row));
    }

    #[test]
    fn test_combinators() {
        let row = json!({"a": 1});
        assert!(Predicate::All.matches(&row));
        assert!(!Predicate::None.matches(&row));
        assert!(Predicate::And(vec![]).matches(&row));
        assert!(!Predicate::Or(vec![]).matches(&row));
        assert!(Predicate::And(vec![Predicate::Or(vec![Predicate::None, Predicate::All])]).matches(&row));
    }

    #[test]
    fn test_serialized_shape() {
        let predicate = Predicate::And(vec![Predicate::Or(vec![Predicate::column(
            "salary",
            Comparison::Between {
                gte: Operand::Number(10.0),
                lte: Operand::Number(20.0),
            },
        )])]);

        let json = serde_json::to_value(&predicate).unwrap();
        assert_eq!(
            json,
            json!({"and": [{"or": [{"column": {
                "column": "salary",
                "comparison": {"between": {"gte": 10.0, "lte": 20.0}}
            }}]}]})
        );
    }
}
