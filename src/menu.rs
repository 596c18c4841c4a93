//! Interactive menu over a single registry.
//!
//! Every failed action is reported and the loop carries on; only end of input
//! or the quit option stops it.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use student_tracker::ingest::bootstrap_from_csv;
use student_tracker::{RecapRow, Registry};
use tracing::warn;

use crate::table::format_recap;
use crate::{ReportFormat, write_report};

const MENU: &str = "
=== Student Performance Tracker ===
1) Load data from CSV
2) Add student
3) Set attendance
4) Set grades
5) Show recap
6) Save Markdown report
7) Show remedial students
8) Save HTML report
9) Quit";

pub fn run(registry: Registry) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(registry, stdin.lock(), stdout.lock(), Path::new("out"))
}

fn run_with<R: BufRead, W: Write>(
    mut registry: Registry,
    mut input: R,
    mut out: W,
    report_dir: &Path,
) -> Result<()> {
    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut out, "Choose: ")? else {
            return Ok(());
        };

        let outcome = match choice.as_str() {
            "1" => load(&mut registry, &mut out),
            "2" => add_student(&mut registry, &mut input, &mut out),
            "3" => set_attendance(&mut registry, &mut input, &mut out),
            "4" => set_grades(&mut registry, &mut input, &mut out),
            "5" => {
                let rows: Vec<RecapRow> = registry.recap().collect();
                writeln!(out, "{}", format_recap("Student Performance Recap", &rows))
                    .map_err(Into::into)
            }
            "6" => save(&registry, ReportFormat::Markdown, report_dir, &mut out),
            "7" => {
                let rows: Vec<RecapRow> = registry.remedial().collect();
                let title = format!(
                    "Remedial Students (final score < {})",
                    registry.policy().remedial_below
                );
                writeln!(out, "{}", format_recap(&title, &rows)).map_err(Into::into)
            }
            "8" => save(&registry, ReportFormat::Html, report_dir, &mut out),
            "9" => {
                writeln!(out, "Bye.")?;
                return Ok(());
            }
            other => writeln!(out, "Unknown option '{other}'.").map_err(Into::into),
        };

        if let Err(e) = outcome {
            warn!(error = %e, "Menu action failed");
            writeln!(out, "Error: {e:#}")?;
        }
    }
}

/// Prints `label` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn require<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    prompt(input, out, label)?.ok_or_else(|| anyhow::anyhow!("input ended"))
}

fn require_number<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<f64> {
    let text = require(input, out, label)?;
    text.parse::<f64>()
        .map_err(|_| anyhow::anyhow!("'{text}' is not a number"))
}

fn load<W: Write>(registry: &mut Registry, out: &mut W) -> Result<()> {
    let summary = bootstrap_from_csv(
        registry,
        PathBuf::from("data/attendance.csv"),
        PathBuf::from("data/grades.csv"),
    )?;
    writeln!(
        out,
        "Loaded: {} added, {} already present, {} graded, {} skipped.",
        summary.added, summary.duplicates, summary.graded, summary.skipped
    )?;
    Ok(())
}

fn add_student<R: BufRead, W: Write>(
    registry: &mut Registry,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let identifier = require(input, out, "Student ID: ")?;
    let name = require(input, out, "Name: ")?;
    registry.add_student(&identifier, &name)?;
    writeln!(out, "Student {name} added.")?;
    Ok(())
}

fn set_attendance<R: BufRead, W: Write>(
    registry: &mut Registry,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let identifier = require(input, out, "Student ID: ")?;
    let percent = require_number(input, out, "Attendance %: ")?;
    registry.set_attendance(&identifier, percent)?;
    writeln!(out, "Attendance set.")?;
    Ok(())
}

fn set_grades<R: BufRead, W: Write>(
    registry: &mut Registry,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let identifier = require(input, out, "Student ID: ")?;
    let quiz = require_number(input, out, "Quiz: ")?;
    let assignment = require_number(input, out, "Assignment: ")?;
    let midterm = require_number(input, out, "Midterm: ")?;
    let final_exam = require_number(input, out, "Final exam: ")?;
    registry.set_grades(&identifier, quiz, assignment, midterm, final_exam)?;
    writeln!(out, "Grades set.")?;
    Ok(())
}

fn save<W: Write>(
    registry: &Registry,
    format: ReportFormat,
    report_dir: &Path,
    out: &mut W,
) -> Result<()> {
    let rows: Vec<RecapRow> = registry.recap().collect();
    let path = write_report(&rows, format, Some(report_dir.join(format.file_name())))?;
    writeln!(out, "Report saved to {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(script: &str, report_dir: &Path) -> String {
        let mut out = Vec::new();
        run_with(Registry::new(), script.as_bytes(), &mut out, report_dir).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session(script: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        session_in(script, dir.path())
    }

    #[test]
    fn test_menu_add_grade_and_recap() {
        let out = session("2\nA01\nAlice\n3\nA01\n90\n4\nA01\n80\n70\n60\n50\n5\n9\n");
        assert!(out.contains("Student Alice added."));
        assert!(out.contains("A01        | Alice |          90.00 |       60.00 | C    "));
        assert!(out.contains("Bye."));
    }

    #[test]
    fn test_menu_reports_errors_and_continues() {
        let out = session("2\nA01\nAlice\n2\nA01\nAgain\n3\nA01\n150\n4\nX99\n1\n1\n1\n1\n3\nA01\nabc\n42\n9\n");
        assert!(out.contains("Error: student 'A01' already exists"));
        assert!(out.contains("Error: validation failed"));
        assert!(out.contains("Error: student 'X99' not found"));
        assert!(out.contains("Error: 'abc' is not a number"));
        assert!(out.contains("Unknown option '42'."));
        assert!(out.contains("Bye."));
    }

    #[test]
    fn test_menu_remedial_view() {
        let out = session("2\nA01\nAlice\n2\nB02\nBudi\n4\nB02\n90\n90\n90\n90\n7\n9\n");
        assert!(out.contains("Remedial Students (final score < 70)"));
        assert!(out.contains("A01 "));
        assert!(!out.contains("B02 "));
    }

    #[test]
    fn test_menu_stops_at_end_of_input() {
        let out = session("5\n");
        assert!(out.contains("No students to show."));
        assert!(!out.contains("Bye."));
    }

    #[test]
    fn test_menu_save_reports_path_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_in("2\nA01\nAlice\n6\n8\n9\n", dir.path());

        let md = dir.path().join("report.md");
        let html = dir.path().join("report.html");
        assert!(out.contains(&format!("Report saved to {}", md.display())));
        assert!(out.contains(&format!("Report saved to {}", html.display())));
        assert!(std::fs::read_to_string(&md).unwrap().contains("| A01 | Alice |"));
        assert!(html.exists());
    }

    #[test]
    fn test_menu_refuses_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_in("6\n9\n", dir.path());
        assert!(out.contains("Error: No data to report"));
        assert!(!dir.path().join("report.md").exists());
    }
}
