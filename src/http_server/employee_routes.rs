//! Employee listing and filtering routes

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::PageLimits;
use super::errors::{ApiError, ApiResult};
use crate::engine::{Backend, EngineError, FilterEngine, FilterOutcome};
use crate::executor::{PageRequest, SortDirection};
use crate::filter::{decode_conditions, Record};
use crate::observability::{log_event_with_fields, Event};
use crate::remote::Predicate;

// ==================
// Shared State
// ==================

/// State shared across handlers
#[derive(Debug, Clone)]
pub struct EmployeeState {
    pub engine: FilterEngine,
    pub backend: Backend,
    pub limits: PageLimits,
}

impl EmployeeState {
    pub fn new(engine: FilterEngine, backend: Backend) -> Self {
        Self {
            engine,
            backend,
            limits: PageLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    fn page_request(&self, params: &FilterParams) -> ApiResult<PageRequest> {
        self.limits
            .page_request(
                params.page,
                params.limit,
                params.order_by.as_deref(),
                params.order.as_deref(),
            )
            .map_err(|e| ApiError::Engine(EngineError::from(e)))
    }
}

// ==================
// Request Types
// ==================

/// Query string of `POST /employees/filter`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Body of `POST /employees/filter`.
///
/// Conditions stay untyped until each one is decoded on its own.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filters: Vec<Value>,
}

// ==================
// Routes
// ==================

pub fn employee_routes(state: Arc<EmployeeState>) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler))
        .route("/employees/filter", post(filter_employees_handler))
        .with_state(state)
}

async fn list_employees_handler(
    State(state): State<Arc<EmployeeState>>,
) -> ApiResult<Json<Vec<Record>>> {
    let records = match &state.backend {
        Backend::InMemory(records) => records.as_ref().clone(),
        Backend::Remote(source) => source
            .fetch_page(&Predicate::All, None, SortDirection::Asc, 0, usize::MAX)
            .await
            .inspect_err(|e| {
                log_event_with_fields(Event::RemoteFetchFailed, &[("error", &e.to_string())])
            })?,
    };

    Ok(Json(records))
}

/// A request without a JSON content type carries no filters. A JSON body
/// that does not parse is rejected rather than treated as empty.
fn filter_request(body: Result<Json<FilterRequest>, JsonRejection>) -> ApiResult<FilterRequest> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(FilterRequest::default()),
        Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
    }
}

async fn filter_employees_handler(
    State(state): State<Arc<EmployeeState>>,
    params: Result<Query<FilterParams>, QueryRejection>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<FilterOutcome>> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQueryParam(e.body_text()))?;
    let request = state.page_request(&params)?;

    let submitted = filter_request(body)?.filters;
    let count = submitted.len();
    let (filters, rejected) = decode_conditions(submitted);

    let outcome = state
        .engine
        .run(&state.backend, &filters, &request)
        .await
        .inspect_err(|e| {
            log_event_with_fields(
                Event::RemoteFetchFailed,
                &[("code", e.code()), ("error", &e.to_string())],
            )
        })?
        .with_rejected(rejected);

    log_event_with_fields(
        Event::QueryEvaluated,
        &[
            ("filters", &count.to_string()),
            ("invalid", &outcome.invalid.len().to_string()),
            ("mode", state.backend.mode()),
            ("page", &outcome.page.page.to_string()),
            ("total", &outcome.page.total.to_string()),
        ],
    );

    Ok(Json(outcome))
}
