//! Letter grades and grade points

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade, declared best first so the derived ordering is the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Rank of the grade, 0 being the best
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map marks to a letter grade.
///
/// Bands are checked top-down; anything that fails every band (including
/// NaN) is an `F`.
pub fn grade_for(marks: f64) -> Grade {
    if marks >= 85.0 {
        Grade::APlus
    } else if marks >= 75.0 {
        Grade::A
    } else if marks >= 65.0 {
        Grade::B
    } else if marks >= 55.0 {
        Grade::C
    } else if marks >= 40.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// Map marks to a grade point on the 4.0 scale.
pub fn grade_point_for(marks: f64) -> f64 {
    if marks >= 85.0 {
        4.0
    } else if marks >= 75.0 {
        3.7
    } else if marks >= 65.0 {
        3.0
    } else if marks >= 55.0 {
        2.0
    } else if marks >= 40.0 {
        1.0
    } else {
        0.0
    }
}

/// Best grade among `grades`, or `None` when there are none.
pub fn best_grade<I>(grades: I) -> Option<Grade>
where
    I: IntoIterator<Item = Grade>,
{
    grades.into_iter().min_by_key(Grade::rank)
}
