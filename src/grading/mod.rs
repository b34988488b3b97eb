//! # Grading Engine
//!
//! Pure functions mapping marks to letter grades and grade points, and
//! aggregating grade points into a GPA.
//!
//! # Bands
//!
//! | Marks  | Grade | Point |
//! |--------|-------|-------|
//! | >= 85  | A+    | 4.0   |
//! | >= 75  | A     | 3.7   |
//! | >= 65  | B     | 3.0   |
//! | >= 55  | C     | 2.0   |
//! | >= 40  | D     | 1.0   |
//! | else   | F     | 0.0   |

pub mod gpa;
pub mod grade;
pub mod validation;

pub use gpa::{calculate_gpa, format_gpa, round_to_cents};
pub use grade::{best_grade, grade_for, grade_point_for, Grade};
pub use validation::{is_valid_marks, is_valid_regno, parse_marks};
