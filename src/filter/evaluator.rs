//! In-memory condition evaluation
//!
//! Evaluates conditions against records strictly according to the field's
//! declared type. Evaluation never fails: a missing value or an unparseable
//! number/date makes the condition false, and an operator the type does not
//! know makes it true.

use serde_json::Value;

use super::accessor::get_path;
use super::coerce::{
    bound_date, bound_number, date_of, filter_date, filter_number, filter_text, identical,
    number_of, overlaps, text_of,
};
use super::condition::FilterCondition;
use super::groups::ConditionGroups;
use crate::schema::{FieldSchemaRegistry, FieldType, Operator};

/// Records are loosely typed JSON objects
pub type Record = Value;

/// Evaluates conditions against in-memory records
pub struct Evaluator<'a> {
    registry: &'a FieldSchemaRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a FieldSchemaRegistry) -> Self {
        Self { registry }
    }

    /// Keeps the records matching every field group.
    ///
    /// An empty condition set returns the input unchanged.
    pub fn filter_all(&self, records: &[Record], conditions: &[FilterCondition]) -> Vec<Record> {
        if conditions.is_empty() {
            return records.to_vec();
        }

        let groups = ConditionGroups::by_field(conditions);

        records
            .iter()
            .filter(|record| groups.matches(|c| self.evaluate(record, c)))
            .cloned()
            .collect()
    }

    /// Evaluates one condition against one record
    pub fn evaluate(&self, record: &Record, condition: &FilterCondition) -> bool {
        let Some(actual) = get_path(record, &condition.field) else {
            return false;
        };

        // No declared type to interpret the condition with
        let Some(entry) = self.registry.lookup(&condition.field) else {
            return true;
        };

        let Some(op) = Operator::parse(&condition.operator) else {
            return true;
        };

        match entry.field_type {
            FieldType::Text => Self::eval_text(actual, op, condition),
            FieldType::Number => Self::eval_number(actual, op, condition),
            FieldType::Currency => Self::eval_currency(actual, op, condition),
            FieldType::Date => Self::eval_date(actual, op, condition),
            FieldType::Boolean => match op {
                Operator::Is => identical(actual, &condition.value),
                _ => true,
            },
            FieldType::SingleSelect => match op {
                Operator::Is => identical(actual, &condition.value),
                Operator::IsNot => !identical(actual, &condition.value),
                _ => true,
            },
            FieldType::MultiSelect => Self::eval_multi_select(actual, op, condition),
        }
    }

    fn eval_text(actual: &Value, op: Operator, condition: &FilterCondition) -> bool {
        if condition.value.is_empty() {
            return true;
        }

        let (Some(field), Some(needle)) = (text_of(actual), filter_text(&condition.value)) else {
            return false;
        };

        match op {
            Operator::Equals => field == needle,
            Operator::Contains => field.contains(&needle),
            Operator::StartsWith => field.starts_with(&needle),
            Operator::EndsWith => field.ends_with(&needle),
            Operator::NotContains => !field.contains(&needle),
            _ => true,
        }
    }

    fn eval_number(actual: &Value, op: Operator, condition: &FilterCondition) -> bool {
        let (Some(field), Some(target)) = (number_of(actual), filter_number(&condition.value))
        else {
            return false;
        };

        match op {
            Operator::Equals => field == target,
            Operator::Gt => field > target,
            Operator::Lt => field < target,
            Operator::Gte => field >= target,
            Operator::Lte => field <= target,
            _ => true,
        }
    }

    fn eval_currency(actual: &Value, op: Operator, condition: &FilterCondition) -> bool {
        if op != Operator::Between {
            return true;
        }

        let Some((min, max)) = condition.value.range() else {
            return false;
        };

        match (number_of(actual), bound_number(min), bound_number(max)) {
            (Some(field), Some(min), Some(max)) => min <= field && field <= max,
            _ => false,
        }
    }

    fn eval_date(actual: &Value, op: Operator, condition: &FilterCondition) -> bool {
        let Some(field) = date_of(actual) else {
            return false;
        };

        match op {
            Operator::Between => {
                let Some((start, end)) = condition.value.range() else {
                    return false;
                };
                match (bound_date(start), bound_date(end)) {
                    (Some(start), Some(end)) => start <= field && field <= end,
                    _ => false,
                }
            }
            Operator::Before => filter_date(&condition.value).is_some_and(|d| field < d),
            Operator::After => filter_date(&condition.value).is_some_and(|d| field > d),
            _ => true,
        }
    }

    /// `notIn` is the literal negation of `in`'s existential check.
    fn eval_multi_select(actual: &Value, op: Operator, condition: &FilterCondition) -> bool {
        let any_present = condition
            .value
            .options()
            .and_then(|options| overlaps(actual, options));

        match (op, any_present) {
            (Operator::In, Some(any)) => any,
            (Operator::NotIn, Some(any)) => !any,
            (Operator::In | Operator::NotIn, None) => false,
            _ => true,
        }
    }
}
