//! HTTP error mapping
//!
//! Every error body is `{error, code}` with the originating error's code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;
use crate::remote::SourceError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Query string value out of range
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Body present but not a JSON filter request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Source(#[from] SourceError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQueryParam(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::InvalidPage(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::RemoteFetch(_)) | ApiError::Source(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidQueryParam(_) => "API_INVALID_QUERY_PARAM",
            ApiError::InvalidBody(_) => "API_INVALID_BODY",
            ApiError::Engine(e) => e.code(),
            ApiError::Source(e) => e.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::from(&self));
        (self.status_code(), body).into_response()
    }
}
