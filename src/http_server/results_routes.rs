//! Result HTTP Routes
//!
//! Create, list, look up, update and delete examination results.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::grading::{is_valid_marks, is_valid_regno, parse_marks};
use crate::store::{NewResult, ResultPatch, ResultRecord, ResultRepository};

use super::errors::{ApiError, ApiResult};
use super::extract::JsonOrForm;

pub const MISSING_FIELDS: &str =
    "Missing required fields: regno, subject, and marks are required";
pub const INVALID_MARKS: &str = "Invalid marks. Marks must be a number between 0 and 100";
pub const BLANK_FIELDS: &str = "Invalid fields: regno and subject must not be blank";
pub const EMPTY_UPDATE: &str = "No fields to update: provide regno, subject, or marks";
pub const NO_RESULTS_FOR_REGNO: &str = "No results found for the given registration number";
pub const RESULT_NOT_FOUND: &str = "Result not found";

// ==================
// Shared State
// ==================

/// Result store handle shared across handlers
pub struct ResultsState {
    pub repository: Arc<dyn ResultRepository>,
}

impl ResultsState {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self { repository }
    }
}

// ==================
// Request/Response Types
// ==================

/// Keeps an explicit `null` distinguishable from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateResultRequest {
    #[serde(default)]
    pub regno: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub marks: Option<Value>,
}

impl CreateResultRequest {
    /// Check required fields and marks, yielding input for the store
    pub fn validate(self) -> ApiResult<NewResult> {
        let (regno, subject, marks) = match (self.regno, self.subject, self.marks) {
            (Some(regno), Some(subject), Some(marks))
                if is_valid_regno(&regno) && !subject.trim().is_empty() =>
            {
                (regno, subject, marks)
            }
            _ => return Err(ApiError::validation(MISSING_FIELDS)),
        };

        let marks = validated_marks(&marks)?;
        Ok(NewResult::new(regno, subject, marks))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateResultRequest {
    #[serde(default)]
    pub regno: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub marks: Option<Value>,
}

impl UpdateResultRequest {
    /// Check the supplied fields, yielding a patch for the store
    pub fn validate(self) -> ApiResult<ResultPatch> {
        let blank = |field: &Option<String>| field.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.regno) || blank(&self.subject) {
            return Err(ApiError::validation(BLANK_FIELDS));
        }

        let marks = self.marks.as_ref().map(validated_marks).transpose()?;

        let patch = ResultPatch {
            regno: self.regno,
            subject: self.subject,
            marks,
        };
        if patch.is_empty() {
            return Err(ApiError::validation(EMPTY_UPDATE));
        }
        Ok(patch)
    }
}

fn validated_marks(value: &Value) -> ApiResult<f64> {
    parse_marks(value)
        .filter(|m| is_valid_marks(*m))
        .ok_or_else(|| ApiError::validation(INVALID_MARKS))
}

#[derive(Debug, Serialize)]
pub struct ResultMessageResponse {
    pub message: String,
    pub result: ResultRecord,
}

#[derive(Debug, Serialize)]
pub struct ResultsListResponse {
    pub results: Vec<ResultRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RegnoResultsResponse {
    pub regno: String,
    pub results: Vec<ResultRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Result Routes
// ==================

/// Create result routes
///
/// The path segment after `/results/` is a registration number for `GET`
/// and a record id for `PATCH` and `DELETE`.
pub fn results_routes(state: Arc<ResultsState>) -> Router {
    Router::new()
        .route("/results", get(list_results_handler).post(create_result_handler))
        .route(
            "/results/:key",
            get(results_by_regno_handler)
                .patch(update_result_handler)
                .delete(delete_result_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_result_handler(
    State(state): State<Arc<ResultsState>>,
    JsonOrForm(request): JsonOrForm<CreateResultRequest>,
) -> ApiResult<(StatusCode, Json<ResultMessageResponse>)> {
    let input = request.validate().inspect_err(|e| warn!(error = %e, "rejected new result"))?;

    let record = state.repository.add(ResultRecord::create(input))?;
    info!(id = %record.id, regno = %record.regno, grade = %record.grade, "result added");

    Ok((
        StatusCode::CREATED,
        Json(ResultMessageResponse {
            message: "Result added successfully".to_string(),
            result: record,
        }),
    ))
}

async fn list_results_handler(
    State(state): State<Arc<ResultsState>>,
) -> ApiResult<Json<ResultsListResponse>> {
    let results = state.repository.all()?;

    Ok(Json(ResultsListResponse {
        count: results.len(),
        results,
    }))
}

async fn results_by_regno_handler(
    State(state): State<Arc<ResultsState>>,
    Path(regno): Path<String>,
) -> ApiResult<Json<RegnoResultsResponse>> {
    let results = state.repository.by_regno(&regno)?;

    if results.is_empty() {
        return Err(ApiError::not_found_with(NO_RESULTS_FOR_REGNO, "regno", regno));
    }

    Ok(Json(RegnoResultsResponse {
        regno,
        count: results.len(),
        results,
    }))
}

async fn update_result_handler(
    State(state): State<Arc<ResultsState>>,
    Path(id): Path<String>,
    JsonOrForm(request): JsonOrForm<UpdateResultRequest>,
) -> ApiResult<Json<ResultMessageResponse>> {
    let patch = request.validate()?;

    // Grade stays as derived at creation, even when marks change.
    let record = state
        .repository
        .update(&id, patch)?
        .ok_or_else(|| ApiError::not_found(RESULT_NOT_FOUND))?;
    info!(id = %record.id, "result updated");

    Ok(Json(ResultMessageResponse {
        message: "Result updated successfully".to_string(),
        result: record,
    }))
}

async fn delete_result_handler(
    State(state): State<Arc<ResultsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.repository.delete(&id)? {
        return Err(ApiError::not_found(RESULT_NOT_FOUND));
    }
    info!(%id, "result deleted");

    Ok(Json(MessageResponse {
        message: "Result deleted successfully".to_string(),
    }))
}
