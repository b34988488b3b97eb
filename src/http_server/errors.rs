//! # API Errors
//!
//! Error taxonomy for request handling. Every variant renders as a JSON
//! body of the form `{ "error": <message>, ...context }`.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned with every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing or invalid input fields
    #[error("{0}")]
    Validation(String),

    /// Lookup by id or regno found nothing
    #[error("{message}")]
    NotFound {
        message: String,
        context: Map<String, Value>,
    },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected fault while handling the request
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Not found with no extra context
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            context: Map::new(),
        }
    }

    /// Not found carrying one extra field in the body
    pub fn not_found_with(
        message: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let mut context = Map::new();
        context.insert(key.into(), value.into());
        ApiError::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        match self {
            ApiError::Validation(message) => {
                body.insert("error".to_string(), Value::from(message.as_str()));
            }
            ApiError::NotFound { message, context } => {
                body.insert("error".to_string(), Value::from(message.as_str()));
                body.extend(context.clone());
            }
            ApiError::Internal(details) => {
                body.insert("error".to_string(), Value::from(INTERNAL_ERROR_MESSAGE));
                body.insert("details".to_string(), Value::from(details.as_str()));
            }
        }
        Value::Object(body)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(details) => tracing::error!(%details, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}
