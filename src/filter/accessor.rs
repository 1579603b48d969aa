//! Dot-path field access into loosely typed records

use serde_json::Value;

/// Resolves a dot-separated path (`address.city`) inside a record.
///
/// Absence is a first-class result: a missing key, a non-object along the
/// way, or a JSON `null` at the end all yield `None`.
pub fn get_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let value = path
        .split('.')
        .try_fold(record, |current, key| current.as_object()?.get(key))?;

    if value.is_null() {
        None
    } else {
        Some(value)
    }
}
