//! Input checks for marks and registration numbers

use serde_json::Value;

/// True iff `marks` is a finite number in `[0, 100]`.
pub fn is_valid_marks(marks: f64) -> bool {
    marks.is_finite() && (0.0..=100.0).contains(&marks)
}

/// True iff `regno` is non-empty after trimming.
pub fn is_valid_regno(regno: &str) -> bool {
    !regno.trim().is_empty()
}

/// Read marks from a JSON number or a numeric string.
///
/// Does not check the range; see [`is_valid_marks`].
pub fn parse_marks(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
