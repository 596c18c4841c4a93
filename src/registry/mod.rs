//! The student registry.
//!
//! [`Registry`] exclusively owns every [`Student`] it holds, keyed by
//! identifier and kept in insertion order. It is an ordinary value: create
//! one, pass it by reference to whoever needs it. If several threads need it,
//! wrap the whole registry in a single mutex.

pub mod types;

pub use types::{ClassSummary, RecapRow, Student};

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::grading::calculator::validate_percent;
use crate::grading::utility::{mean, round2};
use crate::grading::{GradeComponents, GradingPolicy};

#[derive(Debug, Default)]
pub struct Registry {
    students: IndexMap<String, Student>,
    policy: GradingPolicy,
}

impl Registry {
    /// Creates an empty registry using the default grading policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that scores with `policy`.
    ///
    /// Fails with [`TrackerError::Validation`] if the policy breaks any of the
    /// rules checked by [`GradingPolicy::validate`].
    pub fn with_policy(policy: GradingPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            students: IndexMap::new(),
            policy,
        })
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.students.contains_key(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&Student> {
        self.students.get(identifier)
    }

    /// Adds a new student at the end of the iteration order.
    ///
    /// Identifier and name are trimmed and must not be empty. An identifier
    /// that is already present fails with [`TrackerError::DuplicateKey`] and
    /// leaves the stored record untouched.
    pub fn add_student(&mut self, identifier: &str, name: &str) -> Result<()> {
        let identifier = identifier.trim();
        let name = name.trim();
        if identifier.is_empty() {
            return Err(TrackerError::Validation(
                "student identifier must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(TrackerError::Validation(format!(
                "name for student '{identifier}' must not be empty"
            )));
        }

        match self.students.entry(identifier.to_string()) {
            Entry::Occupied(_) => Err(TrackerError::DuplicateKey(identifier.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Student::new(identifier.to_string(), name.to_string()));
                debug!(identifier, name, "Student added");
                Ok(())
            }
        }
    }

    /// Overwrites the attendance percentage of an existing student.
    pub fn set_attendance(&mut self, identifier: &str, percent: f64) -> Result<()> {
        let student = self.student_mut(identifier)?;
        validate_percent("attendance", percent)?;
        student.attendance = Some(percent);
        debug!(identifier, percent, "Attendance set");
        Ok(())
    }

    /// Overwrites all four grade components of an existing student.
    ///
    /// Every component is validated before anything is written, so a
    /// rejected call leaves the previous components intact.
    pub fn set_grades(
        &mut self,
        identifier: &str,
        quiz: f64,
        assignment: f64,
        midterm: f64,
        final_exam: f64,
    ) -> Result<()> {
        let student = self.student_mut(identifier)?;
        let grades = GradeComponents::new(quiz, assignment, midterm, final_exam)?;
        student.grades = grades;
        debug!(identifier, ?grades, "Grades set");
        Ok(())
    }

    /// Yields one freshly computed row per student, in insertion order.
    ///
    /// The iterator is lazy and borrows the registry; call again for a new pass.
    pub fn recap(&self) -> impl Iterator<Item = RecapRow> + '_ {
        self.students
            .values()
            .map(|student| student.recap_row(&self.policy))
    }

    /// Recap rows whose final score is below the policy's remedial threshold.
    pub fn remedial(&self) -> impl Iterator<Item = RecapRow> + '_ {
        remedial(self.recap(), self.policy.remedial_below)
    }

    /// Student count, mean final score and remedial count over the current recap.
    pub fn class_summary(&self) -> ClassSummary {
        let scores: Vec<f64> = self.recap().map(|row| row.final_score).collect();
        let remedial = scores
            .iter()
            .filter(|score| **score < self.policy.remedial_below)
            .count();
        ClassSummary {
            students: scores.len(),
            mean_final_score: round2(mean(&scores)),
            remedial,
        }
    }

    fn student_mut(&mut self, identifier: &str) -> Result<&mut Student> {
        self.students
            .get_mut(identifier)
            .ok_or_else(|| TrackerError::NotFound(identifier.to_string()))
    }
}

/// Keeps only rows whose final score is strictly below `threshold`, preserving order.
pub fn remedial<I>(rows: I, threshold: f64) -> impl Iterator<Item = RecapRow>
where
    I: IntoIterator<Item = RecapRow>,
{
    rows.into_iter()
        .filter(move |row| row.final_score < threshold)
}
