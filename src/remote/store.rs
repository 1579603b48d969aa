//! In-process record source over a seeded row collection

use async_trait::async_trait;

use super::aliases::AliasTable;
use super::predicate::Predicate;
use super::source::{RecordSource, SourceResult};
use crate::executor::{ResultSorter, SortDirection, SortSpec};
use crate::filter::Record;

/// A stored record and the flat row predicates are evaluated against
#[derive(Debug, Clone)]
struct StoredRow {
    row: Record,
    record: Record,
}

/// Executes compiled predicates over flat rows held in memory.
///
/// Matching and ordering read the flat row; results are the records as
/// they were seeded.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<StoredRow>,
}

impl MemoryStore {
    /// Store over rows that are already in backend shape
    pub fn new(rows: Vec<Record>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| StoredRow {
                record: row.clone(),
                row,
            })
            .collect();
        Self { rows }
    }

    /// Store over nested records, flattened through the alias table
    pub fn seeded(records: &[Record], aliases: &AliasTable) -> Self {
        let rows = records
            .iter()
            .map(|record| StoredRow {
                row: aliases.flatten(record),
                record: record.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn matching<'a>(&'a self, predicate: &'a Predicate) -> impl Iterator<Item = &'a StoredRow> {
        self.rows.iter().filter(|stored| predicate.matches(&stored.row))
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        order_by: Option<&str>,
        order: SortDirection,
        offset: usize,
        limit: usize,
    ) -> SourceResult<Vec<Record>> {
        let mut rows: Vec<&StoredRow> = self.matching(predicate).collect();

        if let Some(field) = order_by {
            let spec = SortSpec::new(field, order);
            rows.sort_by(|a, b| ResultSorter::compare(&a.row, &b.row, &spec));
        }

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn fetch_count(&self, predicate: &Predicate) -> SourceResult<usize> {
        Ok(self.matching(predicate).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Comparison, Operand};
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::seeded(
            &[
                json!({"name": "Ada", "projects": 3, "address": {"city": "Austin"}}),
                json!({"name": "Bo", "projects": 1, "address": {"city": "Seattle"}}),
                json!({"name": "Cy", "projects": 5, "address": {"city": "Austin"}}),
            ],
            &AliasTable::employees(),
        )
    }

    #[tokio::test]
    async fn test_page_and_count_share_predicate() {
        let store = store();
        let predicate = Predicate::column("city", Comparison::TextEquals("austin".into()));

        let page = store
            .fetch_page(&predicate, Some("projects"), SortDirection::Desc, 0, 1)
            .await
            .unwrap();
        let count = store.fetch_count(&predicate).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["name"], "Cy");
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let store = store();
        let page = store
            .fetch_page(&Predicate::All, None, SortDirection::Asc, 10, 10)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_unsorted_keeps_insertion_order() {
        let store = store();
        let predicate = Predicate::column("projects", Comparison::Gte(Operand::Number(1.0)));
        let page = store
            .fetch_page(&predicate, None, SortDirection::Asc, 0, 10)
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Ada", "Bo", "Cy"]);
    }

    #[tokio::test]
    async fn test_returns_seeded_shape() {
        let store = store();
        let predicate = Predicate::column("city", Comparison::TextEquals("seattle".into()));
        let page = store
            .fetch_page(&predicate, Some("city"), SortDirection::Asc, 0, 10)
            .await
            .unwrap();

        assert_eq!(
            page,
            [json!({"name": "Bo", "projects": 1, "address": {"city": "Seattle"}})]
        );
    }
}
