//! Result sorting
//!
//! Single-field, stable and deterministic.

use std::cmp::Ordering;

use serde_json::Value;

use super::page::{SortDirection, SortSpec};
use crate::filter::coerce::text_of;
use crate::filter::{get_path, Record};

/// Sorts records in place
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records according to sort specification.
    ///
    /// Records whose sort field is missing or null come first in both
    /// directions. Direction applies to present values only.
    pub fn sort(records: &mut [Record], sort_spec: &SortSpec) {
        records.sort_by(|a, b| Self::compare(a, b, sort_spec));
    }

    /// Orders two records by the sort field, nulls first
    pub fn compare(a: &Record, b: &Record, sort_spec: &SortSpec) -> Ordering {
        let a_val = get_path(a, &sort_spec.field);
        let b_val = get_path(b, &sort_spec.field);

        match (a_val, b_val) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let ordering = Self::compare_values(a_val, b_val);
                match sort_spec.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// Numeric when both are numbers, otherwise case-insensitive text
    fn compare_values(a: &Value, b: &Value) -> Ordering {
        if let (Value::Number(a_n), Value::Number(b_n)) = (a, b) {
            let a_f = a_n.as_f64().unwrap_or(0.0);
            let b_f = b_n.as_f64().unwrap_or(0.0);
            return a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal);
        }

        text_of(a).cmp(&text_of(b))
    }
}
