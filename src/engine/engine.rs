//! Filter engine orchestration
//!
//! validate → (evaluate | compile + fetch) → sort → paginate

use std::sync::Arc;

use serde::Serialize;

use super::errors::EngineResult;
use crate::executor::{PageRequest, QueryPage, ResultAssembler};
use crate::filter::{ConditionDiagnostic, ConditionValidator, Evaluator, FilterCondition, Partition, Record};
use crate::remote::{AliasTable, Predicate, PredicateCompiler, RecordSource};
use crate::schema::FieldSchemaRegistry;

/// Where records come from
#[derive(Clone)]
pub enum Backend {
    /// Fully materialized collection, evaluated in-process
    InMemory(Arc<Vec<Record>>),
    /// Compiled predicates executed by a record source
    Remote(Arc<dyn RecordSource>),
}

impl Backend {
    pub fn mode(&self) -> &'static str {
        match self {
            Backend::InMemory(_) => "memory",
            Backend::Remote(_) => "remote",
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::InMemory(records) => f.debug_tuple("InMemory").field(&records.len()).finish(),
            Backend::Remote(_) => f.write_str("Remote"),
        }
    }
}

/// A page plus diagnostics for the conditions that were excluded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    #[serde(flatten)]
    pub page: QueryPage,
    pub invalid: Vec<ConditionDiagnostic>,
}

impl FilterOutcome {
    /// Puts diagnostics for conditions that never decoded ahead of the
    /// validator's
    pub fn with_rejected(mut self, rejected: Vec<ConditionDiagnostic>) -> Self {
        self.invalid.splice(0..0, rejected);
        self
    }
}

/// Runs condition sets over either record source.
///
/// Cheap to clone; the registry and alias table are shared read-only.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    registry: Arc<FieldSchemaRegistry>,
    aliases: Arc<AliasTable>,
}

impl FilterEngine {
    pub fn new(registry: Arc<FieldSchemaRegistry>, aliases: Arc<AliasTable>) -> Self {
        Self { registry, aliases }
    }

    /// Employee directory schema with its default column aliases
    pub fn employees() -> Self {
        Self::new(
            Arc::new(FieldSchemaRegistry::employees()),
            Arc::new(AliasTable::employees()),
        )
    }

    pub fn registry(&self) -> &FieldSchemaRegistry {
        &self.registry
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Splits conditions into the evaluable subset and diagnostics
    pub fn validate(&self, conditions: &[FilterCondition]) -> Partition {
        ConditionValidator::new(&self.registry).partition(conditions)
    }

    /// Compiles the valid subset of conditions
    pub fn compile(&self, conditions: &[FilterCondition]) -> Predicate {
        let partition = self.validate(conditions);
        PredicateCompiler::new(&self.registry, &self.aliases).compile(&partition.valid)
    }

    /// Filters, sorts and paginates an in-memory collection
    pub fn run_in_memory(
        &self,
        records: &[Record],
        conditions: &[FilterCondition],
        request: &PageRequest,
    ) -> FilterOutcome {
        let Partition { valid, invalid } = self.validate(conditions);

        let filtered = Evaluator::new(&self.registry).filter_all(records, &valid);
        let page = ResultAssembler::assemble(filtered, request);

        FilterOutcome { page, invalid }
    }

    /// Runs against whichever backend is active
    pub async fn run(
        &self,
        backend: &Backend,
        conditions: &[FilterCondition],
        request: &PageRequest,
    ) -> EngineResult<FilterOutcome> {
        match backend {
            Backend::InMemory(records) => Ok(self.run_in_memory(records, conditions, request)),
            Backend::Remote(source) => self.run_remote(source.as_ref(), conditions, request).await,
        }
    }

    /// Compiles and executes against a remote source
    pub async fn run_remote(
        &self,
        source: &dyn RecordSource,
        conditions: &[FilterCondition],
        request: &PageRequest,
    ) -> EngineResult<FilterOutcome> {
        let Partition { valid, invalid } = self.validate(conditions);

        let predicate = PredicateCompiler::new(&self.registry, &self.aliases).compile(&valid);

        // Sort key goes through the same column aliasing as the predicate
        let mut request = request.clone();
        if let Some(sort) = request.sort.as_mut() {
            sort.field = self.aliases.column(&sort.field).to_string();
        }

        let page = ResultAssembler::assemble_remote(source, &predicate, &request).await?;

        Ok(FilterOutcome { page, invalid })
    }
}
