//! Editable, persisted condition list
//!
//! The session is saved in full after every committed change and rehydrated
//! on open. Rehydration drops conditions the schema cannot interpret;
//! conditions whose value is unfinished are kept for further editing.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::StateResult;
use super::store::FilterStateStore;
use crate::filter::{
    decode_conditions, ConditionValidator, FilterCondition, FilterValue, ValidationResult,
};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::schema::FieldSchemaRegistry;

/// Partial edit of one condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl ConditionPatch {
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn operator(operator: impl Into<String>) -> Self {
        Self {
            operator: Some(operator.into()),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<FilterValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

/// One user's filter conditions backed by a store
pub struct FilterSession<S: FilterStateStore> {
    registry: Arc<FieldSchemaRegistry>,
    store: S,
    conditions: Vec<FilterCondition>,
}

impl<S: FilterStateStore> FilterSession<S> {
    /// Loads and sanitizes persisted conditions.
    ///
    /// An unreadable payload starts an empty session. Store I/O failures
    /// are returned.
    pub fn open(registry: Arc<FieldSchemaRegistry>, store: S) -> StateResult<Self> {
        let conditions = match store.load()? {
            Some(payload) => rehydrate(&registry, &payload),
            None => Vec::new(),
        };

        log_event_with_fields(
            Event::StateLoaded,
            &[("conditions", &conditions.len().to_string())],
        );

        Ok(Self {
            registry,
            store,
            conditions,
        })
    }

    /// Appends a condition and returns its id
    pub fn add(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> StateResult<String> {
        let condition = FilterCondition::new(field, operator, value);
        let id = condition.id.clone();
        self.commit(|conditions| conditions.push(condition))?;
        Ok(id)
    }

    /// Applies a patch. Changing the field resets operator and value.
    ///
    /// Returns `false` when no condition has that id.
    pub fn update(&mut self, id: &str, patch: ConditionPatch) -> StateResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        self.commit(|conditions| {
            let condition = &mut conditions[index];
            match patch.field {
                Some(field) if field != condition.field => {
                    condition.field = field;
                    condition.operator = String::new();
                    condition.value = FilterValue::Empty;
                }
                _ => {}
            }
            if let Some(operator) = patch.operator {
                condition.operator = operator;
            }
            if let Some(value) = patch.value {
                condition.value = value;
            }
        })?;
        Ok(true)
    }

    /// Returns `false` when no condition has that id
    pub fn remove(&mut self, id: &str) -> StateResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.commit(|conditions| {
            conditions.remove(index);
        })?;
        Ok(true)
    }

    pub fn clear(&mut self) -> StateResult<()> {
        self.commit(Vec::clear)
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Validation result per condition id, in list order
    pub fn diagnostics(&self) -> IndexMap<String, ValidationResult> {
        let validator = ConditionValidator::new(&self.registry);
        self.conditions
            .iter()
            .map(|c| (c.id.clone(), validator.validate(c)))
            .collect()
    }

    /// The subset that takes part in evaluation
    pub fn valid_conditions(&self) -> Vec<FilterCondition> {
        ConditionValidator::new(&self.registry)
            .partition(&self.conditions)
            .valid
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.conditions.iter().position(|c| c.id == id)
    }

    /// Applies a change to a copy and keeps it only once saved
    fn commit<F>(&mut self, change: F) -> StateResult<()>
    where
        F: FnOnce(&mut Vec<FilterCondition>),
    {
        let mut next = self.conditions.clone();
        change(&mut next);

        let payload = serde_json::to_string(&next)?;
        self.store.save(&payload)?;
        self.conditions = next;

        log_event_with_fields(
            Event::StateSaved,
            &[("conditions", &self.conditions.len().to_string())],
        );
        Ok(())
    }
}

/// Parses a persisted payload, keeping only schema-compatible conditions.
///
/// Elements are decoded one at a time; only a payload that is not a JSON
/// array is treated as corrupt.
fn rehydrate(registry: &FieldSchemaRegistry, payload: &str) -> Vec<FilterCondition> {
    let Ok(items) = serde_json::from_str::<Vec<Value>>(payload) else {
        log_event(Event::StateCorrupt);
        return Vec::new();
    };

    let total = items.len();
    let (decoded, _) = decode_conditions(items);
    let kept: Vec<_> = decoded
        .into_iter()
        .filter(|c| c.is_complete() && registry.supports(&c.field, &c.operator))
        .collect();

    if kept.len() < total {
        log_event_with_fields(
            Event::StateConditionsDropped,
            &[("dropped", &(total - kept.len()).to_string())],
        );
    }

    kept
}
