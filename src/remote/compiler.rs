//! Condition set to backend predicate compilation
//!
//! # Mapping
//!
//! - Fields are renamed through the alias table before grouping, so every
//!   condition on one UI field lands in the same column group
//! - Each column group becomes an OR, the groups are joined by AND
//! - Operators without a backend mapping compile to `Predicate::All`
//! - Values that cannot be coerced to the column's operand compile to
//!   `Predicate::None`, the counterpart of "unparseable means false"

use super::aliases::AliasTable;
use super::predicate::{Comparison, Operand, Predicate};
use crate::filter::coerce::{bound_date, bound_number, filter_date, filter_number, filter_text};
use crate::filter::{ConditionGroups, FilterCondition, FilterValue};
use crate::schema::{FieldSchemaRegistry, FieldType, Operator};

/// Compiles conditions into predicates
pub struct PredicateCompiler<'a> {
    registry: &'a FieldSchemaRegistry,
    aliases: &'a AliasTable,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(registry: &'a FieldSchemaRegistry, aliases: &'a AliasTable) -> Self {
        Self { registry, aliases }
    }

    /// Compiles a condition set. An empty set matches everything.
    pub fn compile(&self, conditions: &[FilterCondition]) -> Predicate {
        if conditions.is_empty() {
            return Predicate::All;
        }

        let groups =
            ConditionGroups::by_key(conditions, |c| self.aliases.column(&c.field).to_string());

        let clauses = groups
            .iter()
            .map(|(column, group)| {
                Predicate::Or(
                    group
                        .iter()
                        .map(|condition| self.compile_condition(column, condition))
                        .collect(),
                )
            })
            .collect();

        Predicate::And(clauses)
    }

    /// Compiles one condition against an already-aliased column
    pub fn compile_condition(&self, column: &str, condition: &FilterCondition) -> Predicate {
        let Some(entry) = self.registry.lookup(&condition.field) else {
            return Predicate::All;
        };
        let Some(op) = Operator::parse(&condition.operator) else {
            return Predicate::All;
        };

        let comparison = match entry.field_type {
            FieldType::Text => Self::text(op, &condition.value),
            FieldType::Number => Self::number(op, &condition.value),
            FieldType::Currency => Self::currency(op, &condition.value),
            FieldType::Date => Self::date(op, &condition.value),
            FieldType::Boolean => Self::boolean(op, &condition.value),
            FieldType::SingleSelect => Self::single_select(op, &condition.value),
            FieldType::MultiSelect => Self::multi_select(op, &condition.value),
        };

        match comparison {
            Leaf::Compare(comparison) => Predicate::column(column, comparison),
            Leaf::NoOp => Predicate::All,
            Leaf::Unmatchable => Predicate::None,
        }
    }

    fn text(op: Operator, value: &FilterValue) -> Leaf {
        if value.is_empty() {
            return Leaf::NoOp;
        }
        let Some(needle) = filter_text(value) else {
            return Leaf::Unmatchable;
        };

        match op {
            Operator::Equals => Leaf::Compare(Comparison::TextEquals(needle)),
            Operator::Contains => Leaf::Compare(Comparison::Contains(needle)),
            Operator::StartsWith => Leaf::Compare(Comparison::StartsWith(needle)),
            Operator::EndsWith => Leaf::Compare(Comparison::EndsWith(needle)),
            Operator::NotContains => Leaf::Compare(Comparison::NotContains(needle)),
            _ => Leaf::NoOp,
        }
    }

    fn number(op: Operator, value: &FilterValue) -> Leaf {
        let make: fn(Operand) -> Comparison = match op {
            Operator::Equals => Comparison::Equals,
            Operator::Gt => Comparison::Gt,
            Operator::Lt => Comparison::Lt,
            Operator::Gte => Comparison::Gte,
            Operator::Lte => Comparison::Lte,
            _ => return Leaf::NoOp,
        };

        match filter_number(value) {
            Some(n) => Leaf::Compare(make(Operand::Number(n))),
            None => Leaf::Unmatchable,
        }
    }

    fn currency(op: Operator, value: &FilterValue) -> Leaf {
        if op != Operator::Between {
            return Leaf::NoOp;
        }

        let bounds = value
            .range()
            .and_then(|(min, max)| Some((bound_number(min)?, bound_number(max)?)));

        match bounds {
            Some((min, max)) => Leaf::Compare(Comparison::Between {
                gte: Operand::Number(min),
                lte: Operand::Number(max),
            }),
            None => Leaf::Unmatchable,
        }
    }

    fn date(op: Operator, value: &FilterValue) -> Leaf {
        match op {
            Operator::Between => {
                let bounds = value
                    .range()
                    .and_then(|(start, end)| Some((bound_date(start)?, bound_date(end)?)));
                match bounds {
                    Some((start, end)) => Leaf::Compare(Comparison::Between {
                        gte: Operand::Date(start),
                        lte: Operand::Date(end),
                    }),
                    None => Leaf::Unmatchable,
                }
            }
            Operator::Before | Operator::After => {
                let Some(date) = filter_date(value) else {
                    return Leaf::Unmatchable;
                };
                if op == Operator::Before {
                    Leaf::Compare(Comparison::Lt(Operand::Date(date)))
                } else {
                    Leaf::Compare(Comparison::Gt(Operand::Date(date)))
                }
            }
            _ => Leaf::NoOp,
        }
    }

    fn boolean(op: Operator, value: &FilterValue) -> Leaf {
        match (op, value) {
            (Operator::Is, FilterValue::Bool(b)) => Leaf::Compare(Comparison::Is(Operand::Bool(*b))),
            (Operator::Is, _) => Leaf::Unmatchable,
            _ => Leaf::NoOp,
        }
    }

    fn single_select(op: Operator, value: &FilterValue) -> Leaf {
        let operand = match value {
            FilterValue::Text(s) => Some(Operand::Text(s.clone())),
            FilterValue::Number(n) => Some(Operand::Number(*n)),
            FilterValue::Bool(b) => Some(Operand::Bool(*b)),
            _ => None,
        };

        match (op, operand) {
            (Operator::Is, Some(operand)) => Leaf::Compare(Comparison::Is(operand)),
            (Operator::Is, None) => Leaf::Unmatchable,
            (Operator::IsNot, Some(operand)) => Leaf::Compare(Comparison::IsNot(operand)),
            // Nothing is identical to a non-scalar value
            (Operator::IsNot, None) => Leaf::Compare(Comparison::Present),
            _ => Leaf::NoOp,
        }
    }

    fn multi_select(op: Operator, value: &FilterValue) -> Leaf {
        let Some(options) = value.options() else {
            return match op {
                Operator::In | Operator::NotIn => Leaf::Unmatchable,
                _ => Leaf::NoOp,
            };
        };

        match op {
            Operator::In => Leaf::Compare(Comparison::HasSome(options.to_vec())),
            Operator::NotIn => Leaf::Compare(Comparison::NotHasSome(options.to_vec())),
            _ => Leaf::NoOp,
        }
    }
}

/// Result of compiling one operator/value pair
enum Leaf {
    Compare(Comparison),
    NoOp,
    Unmatchable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn compile(conditions: &[FilterCondition]) -> Predicate {
        let registry = FieldSchemaRegistry::employees();
        let aliases = AliasTable::employees();
        PredicateCompiler::new(&registry, &aliases).compile(conditions)
    }

    #[test]
    fn test_empty_set_matches_everything() {
        assert_eq!(compile(&[]), Predicate::All);
    }

    #[test]
    fn test_groups_by_column_in_first_seen_order() {
        let predicate = compile(&[
            FilterCondition::new("department", "is", "HR"),
            FilterCondition::new("projects", "gt", 2.0),
            FilterCondition::new("department", "is", "Finance"),
        ]);

        assert_eq!(
            predicate,
            Predicate::And(vec![
                Predicate::Or(vec![
                    Predicate::column("department", Comparison::Is(Operand::Text("HR".into()))),
                    Predicate::column("department", Comparison::Is(Operand::Text("Finance".into()))),
                ]),
                Predicate::Or(vec![Predicate::column(
                    "projects",
                    Comparison::Gt(Operand::Number(2.0))
                )]),
            ])
        );
    }

    #[test]
    fn test_alias_applies_to_every_condition_on_field() {
        let predicate = compile(&[
            FilterCondition::new("address.city", "equals", "Austin"),
            FilterCondition::new("address.city", "contains", "York"),
        ]);

        assert_eq!(
            predicate,
            Predicate::And(vec![Predicate::Or(vec![
                Predicate::column("city", Comparison::TextEquals("austin".into())),
                Predicate::column("city", Comparison::Contains("york".into())),
            ])])
        );
    }

    #[test]
    fn test_between_maps_to_inclusive_range() {
        let predicate = compile(&[
            FilterCondition::number_range("salary", "between", Some(30.0), Some(70.0)),
            FilterCondition::date_range("joinDate", "between", Some("2024-01-01"), Some("2024-12-31")),
        ]);

        let Predicate::And(groups) = predicate else {
            panic!("expected AND");
        };
        assert_eq!(
            groups[0],
            Predicate::Or(vec![Predicate::column(
                "salary",
                Comparison::Between {
                    gte: Operand::Number(30.0),
                    lte: Operand::Number(70.0)
                }
            )])
        );
        assert_eq!(
            groups[1],
            Predicate::Or(vec![Predicate::column(
                "joinDate",
                Comparison::Between {
                    gte: Operand::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                    lte: Operand::Date(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
                }
            )])
        );
    }

    #[test]
    fn test_unknown_operator_is_noop() {
        let predicate = compile(&[FilterCondition::new("name", "soundsLike", "x")]);
        assert_eq!(predicate, Predicate::And(vec![Predicate::Or(vec![Predicate::All])]));
    }

    #[test]
    fn test_unparseable_value_matches_nothing() {
        let predicate = compile(&[FilterCondition::new("projects", "gt", "lots")]);
        assert_eq!(predicate, Predicate::And(vec![Predicate::Or(vec![Predicate::None])]));

        let predicate = compile(&[FilterCondition::new("joinDate", "before", "someday")]);
        assert_eq!(predicate, Predicate::And(vec![Predicate::Or(vec![Predicate::None])]));
    }

    #[test]
    fn test_multiselect_operators() {
        let predicate = compile(&[
            FilterCondition::options("skills", "in", ["React"]),
            FilterCondition::options("skills", "notIn", ["Go"]),
        ]);
        assert_eq!(
            predicate,
            Predicate::And(vec![Predicate::Or(vec![
                Predicate::column("skills", Comparison::HasSome(vec!["React".into()])),
                Predicate::column("skills", Comparison::NotHasSome(vec!["Go".into()])),
            ])])
        );
    }
}
