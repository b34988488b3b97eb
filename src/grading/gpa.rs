//! GPA aggregation

use super::grade::grade_point_for;

/// Arithmetic mean of the grade points for `marks`.
///
/// Returns `0.0` for an empty input.
pub fn calculate_gpa<I>(marks: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (total, count) = marks
        .into_iter()
        .fold((0.0, 0usize), |(total, count), m| {
            (total + grade_point_for(m), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Round to two decimal places, ties away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-decimal string for a GPA, rounded the same way as [`round_to_cents`].
///
/// Plain `{:.2}` rounds exact ties to even (`0.625` to `"0.62"`).
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", round_to_cents(gpa))
}
