//! Statistics HTTP Routes
//!
//! Per-student GPA and the cross-student dashboard.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::grading::{
    best_grade, calculate_gpa, format_gpa, grade_point_for, round_to_cents, Grade,
};
use crate::store::ResultRecord;

use super::errors::{ApiError, ApiResult};
use super::results_routes::{ResultsState, NO_RESULTS_FOR_REGNO};

/// Number of records listed under `recentResults`
pub const RECENT_RESULTS_LIMIT: usize = 5;

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct GradePointEntry {
    pub subject: String,
    pub marks: f64,
    pub grade: Grade,
    pub point: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaResponse {
    pub regno: String,
    /// Formatted to two decimal places
    pub gpa: String,
    pub total_subjects: usize,
    pub grade_points: Vec<GradePointEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_students: usize,
    pub total_subjects: usize,
    #[serde(rename = "averageGPA")]
    pub average_gpa: f64,
    /// Best grade observed, or "N/A" when there are no results
    pub best_grade: String,
    pub recent_results: Vec<ResultRecord>,
}

impl DashboardResponse {
    /// Summarize a snapshot of all records.
    ///
    /// Students are distinct by exact `regno`; each student's GPA covers
    /// every record whose `regno` matches case-insensitively.
    pub fn summarize(records: &[ResultRecord]) -> Self {
        let mut seen = HashSet::new();
        let students: Vec<&str> = records
            .iter()
            .map(|r| r.regno.as_str())
            .filter(|regno| seen.insert(*regno))
            .collect();

        let gpas: Vec<f64> = students
            .iter()
            .map(|student| {
                let wanted = student.to_lowercase();
                calculate_gpa(
                    records
                        .iter()
                        .filter(|r| r.regno.to_lowercase() == wanted)
                        .map(|r| r.marks),
                )
            })
            .collect();

        let average_gpa = if gpas.is_empty() {
            0.0
        } else {
            round_to_cents(gpas.iter().sum::<f64>() / gpas.len() as f64)
        };

        let best = best_grade(records.iter().map(|r| r.grade))
            .map(|g| g.as_str())
            .unwrap_or("N/A");

        Self {
            total_students: students.len(),
            total_subjects: records.len(),
            average_gpa,
            best_grade: best.to_string(),
            recent_results: records
                .iter()
                .rev()
                .take(RECENT_RESULTS_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

// ==================
// Statistics Routes
// ==================

/// Create statistics routes
pub fn stats_routes(state: Arc<ResultsState>) -> Router {
    Router::new()
        .route("/gpa/:regno", get(gpa_handler))
        .route("/dashboard", get(dashboard_handler))
        .with_state(state)
}

async fn gpa_handler(
    State(state): State<Arc<ResultsState>>,
    Path(regno): Path<String>,
) -> ApiResult<Json<GpaResponse>> {
    let results = state.repository.by_regno(&regno)?;

    if results.is_empty() {
        return Err(ApiError::not_found_with(NO_RESULTS_FOR_REGNO, "regno", regno));
    }

    let gpa = calculate_gpa(results.iter().map(|r| r.marks));
    let grade_points = results
        .into_iter()
        .map(|r| GradePointEntry {
            point: grade_point_for(r.marks),
            subject: r.subject,
            marks: r.marks,
            grade: r.grade,
        })
        .collect::<Vec<_>>();

    Ok(Json(GpaResponse {
        regno,
        gpa: format_gpa(gpa),
        total_subjects: grade_points.len(),
        grade_points,
    }))
}

async fn dashboard_handler(
    State(state): State<Arc<ResultsState>>,
) -> ApiResult<Json<DashboardResponse>> {
    let records = state.repository.all()?;
    Ok(Json(DashboardResponse::summarize(&records)))
}
