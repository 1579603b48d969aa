//! Field grouping of conditions
//!
//! Conditions sharing a field form a group combined by OR; groups are
//! combined by AND. Both evaluation paths build on this partition.

use indexmap::IndexMap;

use super::condition::FilterCondition;

/// Conditions keyed by field, in first-seen order
#[derive(Debug, Default)]
pub struct ConditionGroups<'a> {
    groups: IndexMap<String, Vec<&'a FilterCondition>>,
}

impl<'a> ConditionGroups<'a> {
    /// Groups by the condition's own field identifier
    pub fn by_field(conditions: &'a [FilterCondition]) -> Self {
        Self::by_key(conditions, |c| c.field.clone())
    }

    /// Groups by an arbitrary key (e.g. a backend column name).
    ///
    /// Conditions without a field are skipped.
    pub fn by_key<F>(conditions: &'a [FilterCondition], mut key: F) -> Self
    where
        F: FnMut(&FilterCondition) -> String,
    {
        let mut groups: IndexMap<String, Vec<&'a FilterCondition>> = IndexMap::new();

        for condition in conditions.iter().filter(|c| !c.field.is_empty()) {
            groups.entry(key(condition)).or_default().push(condition);
        }

        Self { groups }
    }

    /// AND across groups of OR within a group
    pub fn matches<F>(&self, mut matches_one: F) -> bool
    where
        F: FnMut(&FilterCondition) -> bool,
    {
        self.groups
            .values()
            .all(|group| group.iter().any(|c| matches_one(c)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a FilterCondition])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, key: &str) -> Option<&[&'a FilterCondition]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
