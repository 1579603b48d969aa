//! Evaluation Parity Tests
//!
//! For any condition set, the in-memory evaluator and a predicate-executing
//! record source must return the same records, in the same order and the
//! same shape, with the same total.

use fieldsieve::cli::generate_employees;
use fieldsieve::engine::FilterEngine;
use fieldsieve::executor::{PageRequest, SortSpec};
use fieldsieve::filter::{FilterCondition, Record};
use fieldsieve::remote::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Helpers
// =============================================================================

fn dataset() -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(7);
    generate_employees(60, &mut rng)
}

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Runs the same conditions down both paths and compares every page field
async fn assert_parity(conditions: Vec<FilterCondition>, request: PageRequest) {
    let engine = FilterEngine::employees();
    let records = dataset();
    let store = MemoryStore::seeded(&records, engine.aliases());

    let local = engine.run_in_memory(&records, &conditions, &request);
    let remote = engine
        .run_remote(&store, &conditions, &request)
        .await
        .unwrap();

    assert_eq!(
        local.page.total, remote.page.total,
        "totals differ for {:?}",
        conditions
    );
    assert_eq!(
        ids(&local.page.data),
        ids(&remote.page.data),
        "page order differs for {:?}",
        conditions
    );
    assert_eq!(
        local.page, remote.page,
        "page contents differ for {:?}",
        conditions
    );
    assert_eq!(local.invalid, remote.invalid);
}

fn all_rows() -> PageRequest {
    PageRequest::new(1, 1000).unwrap().with_sort(SortSpec::asc("id"))
}

// =============================================================================
// Per-type operators
// =============================================================================

#[tokio::test]
async fn test_text_operators() {
    for (op, value) in [
        ("equals", "EMPLOYEE 7"),
        ("contains", "1"),
        ("startsWith", "employee 2"),
        ("endsWith", "5"),
        ("notContains", "3"),
    ] {
        assert_parity(vec![FilterCondition::new("name", op, value)], all_rows()).await;
    }
}

#[tokio::test]
async fn test_nested_text_field() {
    assert_parity(
        vec![FilterCondition::new("address.city", "contains", "an")],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::new("address.city", "equals", "austin")],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_number_operators() {
    for op in ["equals", "gt", "lt", "gte", "lte"] {
        assert_parity(vec![FilterCondition::new("projects", op, 4.0)], all_rows()).await;
        assert_parity(
            vec![FilterCondition::new("performanceRating", op, "4.2")],
            all_rows(),
        )
        .await;
    }
}

#[tokio::test]
async fn test_currency_between() {
    assert_parity(
        vec![FilterCondition::number_range(
            "salary",
            "between",
            Some(70_000.0),
            Some(100_000.0),
        )],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_date_operators() {
    assert_parity(
        vec![FilterCondition::date_range(
            "joinDate",
            "between",
            Some("2019-01-01"),
            Some("2021-12-31"),
        )],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::new("joinDate", "before", "2020-06-01")],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::new("joinDate", "after", "2022-03-01")],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_boolean_and_single_select() {
    assert_parity(vec![FilterCondition::new("isActive", "is", true)], all_rows()).await;
    assert_parity(
        vec![FilterCondition::new("department", "is", "Engineering")],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::new("department", "isNot", "Sales")],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_multi_select_operators() {
    assert_parity(
        vec![FilterCondition::options("skills", "in", ["React", "AWS"])],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::options("skills", "notIn", ["Docker"])],
        all_rows(),
    )
    .await;
}

// =============================================================================
// Combination and degenerate inputs
// =============================================================================

/// Same-field conditions OR together, different fields AND together
#[tokio::test]
async fn test_mixed_groups() {
    assert_parity(
        vec![
            FilterCondition::new("department", "is", "HR"),
            FilterCondition::new("department", "is", "Finance"),
            FilterCondition::new("projects", "gte", 3.0),
            FilterCondition::options("skills", "in", ["SQL", "Python", "React"]),
        ],
        all_rows(),
    )
    .await;
}

/// Values that pass validation but cannot be parsed match nothing on both
/// paths
#[tokio::test]
async fn test_unparseable_values() {
    assert_parity(
        vec![FilterCondition::new("projects", "gt", "lots")],
        all_rows(),
    )
    .await;
    assert_parity(
        vec![FilterCondition::options("salary", "between", ["abc", "def"])],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_invalid_conditions_ignored_on_both_paths() {
    assert_parity(
        vec![
            FilterCondition::new("department", "is", "HR"),
            FilterCondition::new("salary", "between", "").with_id("bad-range"),
            FilterCondition::new("nickname", "equals", "x").with_id("unknown"),
        ],
        all_rows(),
    )
    .await;
}

#[tokio::test]
async fn test_sorted_pages_agree() {
    let conditions = vec![FilterCondition::new("isActive", "is", true)];

    for sort in [
        SortSpec::desc("salary"),
        SortSpec::asc("joinDate"),
        SortSpec::asc("address.city"),
        SortSpec::desc("name"),
    ] {
        for page in 1..=3 {
            let request = PageRequest::new(page, 7).unwrap().with_sort(sort.clone());
            assert_parity(conditions.clone(), request).await;
        }
    }
}
