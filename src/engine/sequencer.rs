//! Last-request-wins sequencing
//!
//! Every submitted query takes a ticket. A finished result is applied only
//! if no later ticket has been issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use super::engine::{Backend, FilterEngine, FilterOutcome};
use super::errors::EngineResult;
use crate::executor::PageRequest;
use crate::filter::FilterCondition;
use crate::observability::{log_event_with_fields, Event};

/// Position of a request in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no later ticket exists
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What happened to a submitted query
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Result is now the current page
    Applied(FilterOutcome),
    /// A later query was submitted before this one finished
    Stale(Ticket),
}

/// Runs queries for one consumer and keeps only the newest result
pub struct QueryController {
    engine: FilterEngine,
    backend: Backend,
    sequencer: RequestSequencer,
    current: RwLock<Option<FilterOutcome>>,
}

impl QueryController {
    pub fn new(engine: FilterEngine, backend: Backend) -> Self {
        Self {
            engine,
            backend,
            sequencer: RequestSequencer::new(),
            current: RwLock::new(None),
        }
    }

    /// Runs a query. Errors are returned even for stale requests, since no
    /// state is changed by them.
    pub async fn submit(
        &self,
        conditions: &[FilterCondition],
        request: &PageRequest,
    ) -> EngineResult<Submission> {
        let ticket = self.sequencer.issue();
        let outcome = self.engine.run(&self.backend, conditions, request).await?;

        let mut current = self.current.write().await;
        if !self.sequencer.is_latest(ticket) {
            log_event_with_fields(
                Event::StaleResultDropped,
                &[("ticket", &ticket.value().to_string())],
            );
            return Ok(Submission::Stale(ticket));
        }

        *current = Some(outcome.clone());
        Ok(Submission::Applied(outcome))
    }

    /// Most recently applied result
    pub async fn current_page(&self) -> Option<FilterOutcome> {
        self.current.read().await.clone()
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}

impl std::fmt::Debug for QueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("backend", &self.backend)
            .field("sequencer", &self.sequencer)
            .finish()
    }
}
