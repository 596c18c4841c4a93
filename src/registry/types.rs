//! Data types owned by or derived from the registry.

use serde::Serialize;

use crate::grading::{GradeComponents, GradingPolicy, Weights, final_score};

/// A student record. Final score and letter grade are never stored; they are
/// derived from [`Student::grades`] whenever a recap is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub(crate) identifier: String,
    pub(crate) name: String,
    pub(crate) attendance: Option<f64>,
    pub(crate) grades: GradeComponents,
}

impl Student {
    pub(crate) fn new(identifier: String, name: String) -> Self {
        Self {
            identifier,
            name,
            attendance: None,
            grades: GradeComponents::default(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attendance percentage, `None` until it has been set.
    pub fn attendance(&self) -> Option<f64> {
        self.attendance
    }

    pub fn grades(&self) -> &GradeComponents {
        &self.grades
    }

    pub fn final_score(&self, weights: &Weights) -> f64 {
        final_score(&self.grades, weights)
    }

    pub(crate) fn recap_row(&self, policy: &GradingPolicy) -> RecapRow {
        let final_score = self.final_score(&policy.weights);
        RecapRow {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            attendance: self.attendance.unwrap_or(0.0),
            final_score,
            letter_grade: policy.scale.classify(final_score).to_string(),
        }
    }
}

/// One line of a recap: a fresh snapshot of a student's aggregate values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapRow {
    #[serde(rename = "student_id")]
    pub identifier: String,
    pub name: String,
    pub attendance: f64,
    pub final_score: f64,
    pub letter_grade: String,
}

/// Class-wide totals computed over a recap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub students: usize,
    pub mean_final_score: f64,
    pub remedial: usize,
}
