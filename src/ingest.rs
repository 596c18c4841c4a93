//! CSV bootstrap of the registry from attendance and grades sources.
//!
//! Attendance source columns: `student_id, name, week1..weekN`, each week cell
//! `1` (present), `0` or empty (absent).
//! Grades source columns: `student_id, quiz, assignment, mid, final`.
//!
//! Bad rows are skipped with a warning; loading continues with the next row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Result, TrackerError};
use crate::grading::utility::round2;
use crate::registry::Registry;

/// Counts of what a load did to the registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: usize,
    pub duplicates: usize,
    pub graded: usize,
    pub skipped: usize,
}

/// A single row deserialized from the grades CSV. Missing or empty cells count as 0.
#[derive(Debug, Deserialize)]
struct GradeRow {
    student_id: String,
    #[serde(default)]
    quiz: Option<f64>,
    #[serde(default)]
    assignment: Option<f64>,
    #[serde(default)]
    mid: Option<f64>,
    #[serde(default)]
    r#final: Option<f64>,
}

/// Loads both CSV files into `registry`: attendance first, then grades.
pub fn bootstrap_from_csv(
    registry: &mut Registry,
    attendance_path: impl AsRef<Path>,
    grades_path: impl AsRef<Path>,
) -> Result<LoadSummary> {
    let attendance_path = attendance_path.as_ref();
    let grades_path = grades_path.as_ref();

    let attendance =
        File::open(attendance_path).map_err(|e| TrackerError::io(attendance_path, e))?;
    let grades = File::open(grades_path).map_err(|e| TrackerError::io(grades_path, e))?;

    let mut summary = load_attendance(registry, attendance)?;
    let graded = load_grades(registry, grades)?;
    summary.graded = graded.graded;
    summary.skipped += graded.skipped;

    info!(
        added = summary.added,
        duplicates = summary.duplicates,
        graded = summary.graded,
        skipped = summary.skipped,
        "CSV data loaded"
    );
    Ok(summary)
}

/// Adds every student of an attendance source and sets their attendance percentage.
///
/// A student that already exists keeps its record, but its attendance is
/// still updated from the row.
pub fn load_attendance<R: Read>(registry: &mut Registry, reader: R) -> Result<LoadSummary> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let id_col = column(&headers, "student_id")?;
    let name_col = column(&headers, "name")?;
    let week_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("week"))
        .map(|(i, _)| i)
        .collect();

    let mut summary = LoadSummary::default();

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row = line + 1, error = %e, "Skipping malformed attendance row");
                summary.skipped += 1;
                continue;
            }
        };
        let identifier = record.get(id_col).unwrap_or_default();
        let name = record.get(name_col).unwrap_or_default();

        let percent = match attendance_percent(&record, &week_cols) {
            Ok(percent) => percent,
            Err(e) => {
                warn!(row = line + 1, identifier, error = %e, "Skipping attendance row");
                summary.skipped += 1;
                continue;
            }
        };

        match registry.add_student(identifier, name) {
            Ok(()) => summary.added += 1,
            Err(TrackerError::DuplicateKey(id)) => {
                info!(identifier = %id, "Student already registered, updating attendance");
                summary.duplicates += 1;
            }
            Err(e) => {
                warn!(row = line + 1, error = %e, "Skipping attendance row");
                summary.skipped += 1;
                continue;
            }
        }

        if let Some(percent) = percent {
            registry.set_attendance(identifier.trim(), percent)?;
        }
    }

    Ok(summary)
}

/// Sets the grade components of students already in the registry.
///
/// Rows for unknown students or with out-of-range values are skipped.
pub fn load_grades<R: Read>(registry: &mut Registry, reader: R) -> Result<LoadSummary> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut summary = LoadSummary::default();

    for (line, result) in rdr.deserialize::<GradeRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(row = line + 1, error = %e, "Skipping malformed grades row");
                summary.skipped += 1;
                continue;
            }
        };

        let outcome = registry.set_grades(
            &row.student_id,
            row.quiz.unwrap_or(0.0),
            row.assignment.unwrap_or(0.0),
            row.mid.unwrap_or(0.0),
            row.r#final.unwrap_or(0.0),
        );
        match outcome {
            Ok(()) => summary.graded += 1,
            Err(e) => {
                warn!(row = line + 1, identifier = %row.student_id, error = %e, "Skipping grades row");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| TrackerError::Validation(format!("missing required column '{name}'")))
}

/// Share of week cells flagged present, as a percentage rounded to two decimals.
/// `None` when the source has no week columns.
fn attendance_percent(record: &csv::StringRecord, week_cols: &[usize]) -> Result<Option<f64>> {
    if week_cols.is_empty() {
        return Ok(None);
    }

    let mut present = 0usize;
    for &col in week_cols {
        match record.get(col).unwrap_or_default() {
            "1" => present += 1,
            "0" | "" => {}
            other => {
                return Err(TrackerError::Validation(format!(
                    "attendance flag must be 0, 1 or empty, got '{other}'"
                )));
            }
        }
    }

    Ok(Some(round2(present as f64 / week_cols.len() as f64 * 100.0)))
}
