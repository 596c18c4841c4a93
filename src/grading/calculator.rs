use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::grading::policy::Weights;
use crate::grading::utility::round2;

/// Lowest accepted value for a grade component or attendance percentage.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted value for a grade component or attendance percentage.
pub const MAX_SCORE: f64 = 100.0;

/// The four graded components of a student, each in `[0, 100]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GradeComponents {
    pub quiz: f64,
    pub assignment: f64,
    pub midterm: f64,
    pub final_exam: f64,
}

impl GradeComponents {
    /// Builds a component set, rejecting it as a whole if any value is out of domain.
    pub fn new(quiz: f64, assignment: f64, midterm: f64, final_exam: f64) -> Result<Self> {
        validate_percent("quiz", quiz)?;
        validate_percent("assignment", assignment)?;
        validate_percent("midterm", midterm)?;
        validate_percent("final_exam", final_exam)?;
        Ok(Self {
            quiz,
            assignment,
            midterm,
            final_exam,
        })
    }
}

/// Fails with [`TrackerError::Validation`] unless `value` is finite and within `[0, 100]`.
pub fn validate_percent(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(TrackerError::Validation(format!(
            "{field} must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
        )))
    }
}

/// Weighted sum of the four components, rounded to two decimals.
///
/// ```text
/// final = round2(w_quiz * quiz + w_assignment * assignment
///              + w_midterm * midterm + w_final * final_exam)
/// ```
pub fn final_score(grades: &GradeComponents, weights: &Weights) -> f64 {
    round2(
        weights.quiz * grades.quiz
            + weights.assignment * grades.assignment
            + weights.midterm * grades.midterm
            + weights.final_exam * grades.final_exam,
    )
}
