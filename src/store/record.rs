//! # Result Records
//!
//! The single entity of the service: one examination result for one
//! student in one subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::{grade_for, Grade};

/// A stored examination result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Unique identifier
    pub id: String,

    /// Student registration number (not unique across records)
    pub regno: String,

    pub subject: String,

    /// Marks in `[0, 100]`
    pub marks: f64,

    /// Grade derived from `marks` when the record was created.
    ///
    /// Partial updates do not recompute it.
    pub grade: Grade,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    /// Build a record from validated input with a fresh id and timestamp.
    pub fn create(input: NewResult) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    /// Build a record with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, input: NewResult) -> Self {
        let regno = input.regno.trim().to_string();
        let subject = input.subject.trim().to_string();
        Self {
            id: id.into(),
            regno,
            subject,
            marks: input.marks,
            grade: grade_for(input.marks),
            created_at: Utc::now(),
        }
    }

    /// Shallow-merge the fields present in `patch`.
    pub fn apply(&mut self, patch: ResultPatch) {
        if let Some(regno) = patch.regno {
            self.regno = regno.trim().to_string();
        }
        if let Some(subject) = patch.subject {
            self.subject = subject.trim().to_string();
        }
        if let Some(marks) = patch.marks {
            self.marks = marks;
        }
    }
}

/// Validated input for a new record
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub regno: String,
    pub subject: String,
    pub marks: f64,
}

impl NewResult {
    pub fn new(regno: impl Into<String>, subject: impl Into<String>, marks: f64) -> Self {
        Self {
            regno: regno.into(),
            subject: subject.into(),
            marks,
        }
    }
}

/// Fields to overwrite on an existing record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPatch {
    pub regno: Option<String>,
    pub subject: Option<String>,
    pub marks: Option<f64>,
}

impl ResultPatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.regno.is_none() && self.subject.is_none() && self.marks.is_none()
    }
}

/// Records present in a fresh store
pub fn sample_records() -> Vec<ResultRecord> {
    vec![
        ResultRecord::with_id("1", NewResult::new("2025IT01", "Mathematics", 85.0)),
        ResultRecord::with_id("2", NewResult::new("2025IT02", "Science", 72.0)),
        ResultRecord::with_id("3", NewResult::new("2025IT03", "ICT", 61.0)),
    ]
}
