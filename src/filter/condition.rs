//! Filter conditions and their values

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value half of a condition.
///
/// The JSON shape decides the variant: `null` is `Empty`, an all-string
/// array is `Options`, a two-element array holding numbers or nulls is
/// `NumberRange`, a two-element array of strings with a null end is
/// `DateRange`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Options(Vec<String>),
    NumberRange([Option<f64>; 2]),
    DateRange([Option<String>; 2]),
}

/// One end of a range value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound<'a> {
    Number(f64),
    Text(&'a str),
}

impl FilterValue {
    /// Absent, null, or the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Empty => true,
            FilterValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interprets the value as a `[min, max]` pair.
    ///
    /// Returns `None` when the value has no range shape. Empty strings
    /// count as missing ends.
    pub fn range(&self) -> Option<(Option<Bound<'_>>, Option<Bound<'_>>)> {
        fn text(s: Option<&str>) -> Option<Bound<'_>> {
            s.filter(|s| !s.is_empty()).map(Bound::Text)
        }

        match self {
            FilterValue::NumberRange([min, max]) => {
                Some((min.map(Bound::Number), max.map(Bound::Number)))
            }
            FilterValue::DateRange([start, end]) => {
                Some((text(start.as_deref()), text(end.as_deref())))
            }
            FilterValue::Options(items) if items.len() == 2 => {
                Some((text(Some(&items[0])), text(Some(&items[1]))))
            }
            _ => None,
        }
    }

    /// The value as a list of options, if it is one
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FilterValue::Options(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::Options(items)
    }
}

fn new_condition_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single field/operator/value filter unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Opaque identity, stable across edits
    #[serde(default = "new_condition_id")]
    pub id: String,

    /// Dot-path field identifier, empty while incomplete
    #[serde(default)]
    pub field: String,

    /// Operator name, empty while incomplete
    #[serde(default)]
    pub operator: String,

    #[serde(default)]
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create a condition with a freshly generated id
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            id: new_condition_id(),
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Options-valued condition (multi-select)
    pub fn options<I, S>(field: impl Into<String>, operator: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self::new(field, operator, FilterValue::Options(items))
    }

    /// Numeric range condition
    pub fn number_range(
        field: impl Into<String>,
        operator: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self::new(field, operator, FilterValue::NumberRange([min, max]))
    }

    /// Date range condition (ISO-8601 ends)
    pub fn date_range(
        field: impl Into<String>,
        operator: impl Into<String>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Self {
        Self::new(
            field,
            operator,
            FilterValue::DateRange([start.map(str::to_string), end.map(str::to_string)]),
        )
    }

    /// Both field and operator chosen
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.operator.is_empty()
    }
}
