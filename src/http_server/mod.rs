//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /employees` - Full, unfiltered collection
//! - `POST /employees/filter?page&limit&orderBy&order` - Filtered page

pub mod config;
pub mod employee_routes;
mod errors;
pub mod observability_routes;
pub mod server;

pub use config::{HttpServerConfig, PageLimits};
pub use employee_routes::{EmployeeState, FilterParams, FilterRequest};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use observability_routes::HealthResponse;
pub use server::HttpServer;
