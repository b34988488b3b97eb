//! # HTTP API
//!
//! Axum server exposing the result store and grading statistics as JSON.
//!
//! # Endpoints
//!
//! - `GET    /api/health` - Liveness probe
//! - `POST   /api/results` - Add a result
//! - `GET    /api/results` - List all results
//! - `GET    /api/results/:regno` - Results for one student
//! - `PATCH  /api/results/:id` - Partially update a result
//! - `DELETE /api/results/:id` - Delete a result
//! - `GET    /api/gpa/:regno` - GPA with per-subject breakdown
//! - `GET    /api/dashboard` - Aggregate statistics

pub mod config;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod results_routes;
pub mod server;
pub mod stats_routes;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
