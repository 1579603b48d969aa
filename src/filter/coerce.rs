//! Value coercion shared by the in-memory evaluator and the predicate store.
//!
//! Both evaluation paths must interpret numbers, dates and text the same
//! way, so every coercion lives here. A failed coercion is `None`, never an
//! error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::condition::{Bound, FilterValue};

/// Numeric view of a record value: numbers and numeric strings
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parses a trimmed, finite decimal number
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a calendar instant.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as
/// UTC), and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Date view of a record value: date strings or epoch milliseconds
pub fn date_of(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Lower-cased text view of a record value. Arrays join with `,`.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Option<Vec<String>> = items.iter().map(text_of).collect();
            parts.map(|p| p.join(","))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Numeric view of a filter value
pub fn filter_number(value: &FilterValue) -> Option<f64> {
    match value {
        FilterValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FilterValue::Text(s) => parse_number(s),
        _ => None,
    }
}

/// Date view of a filter value
pub fn filter_date(value: &FilterValue) -> Option<DateTime<Utc>> {
    match value {
        FilterValue::Text(s) => parse_date(s),
        FilterValue::Number(n) => DateTime::from_timestamp_millis(*n as i64),
        _ => None,
    }
}

/// Lower-cased text view of a filter value
pub fn filter_text(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Text(s) => Some(s.to_lowercase()),
        FilterValue::Number(n) => Some(n.to_string()),
        FilterValue::Bool(b) => Some(b.to_string()),
        FilterValue::Options(items) => Some(items.join(",").to_lowercase()),
        _ => None,
    }
}

/// Numeric view of a range end
pub fn bound_number(bound: Option<Bound<'_>>) -> Option<f64> {
    match bound? {
        Bound::Number(n) => Some(n).filter(|n| n.is_finite()),
        Bound::Text(s) => parse_number(s),
    }
}

/// Date view of a range end
pub fn bound_date(bound: Option<Bound<'_>>) -> Option<DateTime<Utc>> {
    match bound? {
        Bound::Number(n) => DateTime::from_timestamp_millis(n as i64),
        Bound::Text(s) => parse_date(s),
    }
}

/// Exact identity between a record value and a scalar filter value.
///
/// No coercion: `"1"` is not `1`, `"true"` is not `true`.
pub fn identical(actual: &Value, expected: &FilterValue) -> bool {
    match (actual, expected) {
        (Value::String(a), FilterValue::Text(e)) => a == e,
        (Value::Bool(a), FilterValue::Bool(e)) => a == e,
        (Value::Number(a), FilterValue::Number(e)) => a.as_f64() == Some(*e),
        _ => false,
    }
}

/// Whether any listed option appears in a record's array value.
///
/// `None` when the record value is not an array.
pub fn overlaps(actual: &Value, options: &[String]) -> Option<bool> {
    let items = actual.as_array()?;
    Some(
        options
            .iter()
            .any(|opt| items.iter().any(|item| item.as_str() == Some(opt.as_str()))),
    )
}
