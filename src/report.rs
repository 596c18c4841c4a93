//! Report documents built from recap rows.
//!
//! Both formats carry the same table: student ID, name, attendance, final
//! score and letter grade, numbers with exactly two decimals, rows in the
//! order given. Filtering or sorting happens before rows reach these functions.

use std::fmt::Write;

use html_escape::encode_text;

use crate::registry::RecapRow;

const TITLE: &str = "Student Performance Report";
const HEADERS: [&str; 5] = [
    "Student ID",
    "Name",
    "Attendance (%)",
    "Final Score",
    "Grade",
];

/// Renders rows as a Markdown document with a single pipe table.
pub fn build_markdown_report(rows: &[RecapRow]) -> String {
    let mut out = format!("# {TITLE}\n\n");
    out.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    out.push_str("|---|---|---:|---:|---|\n");

    for row in rows {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "| {} | {} | {:.2} | {:.2} | {} |",
            escape_markdown(&row.identifier),
            escape_markdown(&row.name),
            row.attendance,
            row.final_score,
            escape_markdown(&row.letter_grade),
        );
    }

    out
}

/// Renders rows as a standalone HTML document with a single table.
pub fn build_html_report(rows: &[RecapRow]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{TITLE}</title>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{TITLE}</h1>");
    out.push_str("<table>\n<thead>\n<tr>");
    for header in HEADERS {
        let _ = write!(out, "<th>{}</th>", encode_text(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>",
            encode_text(&row.identifier),
            encode_text(&row.name),
            row.attendance,
            row.final_score,
            encode_text(&row.letter_grade),
        );
    }

    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, attendance: f64, score: f64, grade: &str) -> RecapRow {
        RecapRow {
            identifier: id.to_string(),
            name: name.to_string(),
            attendance,
            final_score: score,
            letter_grade: grade.to_string(),
        }
    }

    fn sample_rows() -> Vec<RecapRow> {
        vec![
            row("B02", "Budi", 100.0, 90.0, "A"),
            row("A01", "Alice", 90.0, 60.0, "C"),
        ]
    }

    #[test]
    fn test_markdown_report_layout() {
        let md = build_markdown_report(&sample_rows());
        let expected = "\
# Student Performance Report

| Student ID | Name | Attendance (%) | Final Score | Grade |
|---|---|---:|---:|---|
| B02 | Budi | 100.00 | 90.00 | A |
| A01 | Alice | 90.00 | 60.00 | C |
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let md = build_markdown_report(&[row("X1", "A|B", 0.0, 0.0, "E")]);
        assert!(md.contains("| A\\|B |"));
    }

    #[test]
    fn test_html_report_rows_in_input_order() {
        let html = build_html_report(&sample_rows());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            "<tr><th>Student ID</th><th>Name</th><th>Attendance (%)</th><th>Final Score</th><th>Grade</th></tr>"
        ));
        let budi = html
            .find("<tr><td>B02</td><td>Budi</td><td>100.00</td><td>90.00</td><td>A</td></tr>")
            .unwrap();
        let alice = html
            .find("<tr><td>A01</td><td>Alice</td><td>90.00</td><td>60.00</td><td>C</td></tr>")
            .unwrap();
        assert!(budi < alice);
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_escapes_text_cells() {
        let html = build_html_report(&[row("<id>", "Tom & \"Jerry\"", 1.0, 2.0, "E")]);
        assert!(html.contains("<td>&lt;id&gt;</td>"));
        assert!(html.contains("<td>Tom &amp; \"Jerry\"</td>"));
        assert!(!html.contains("<td><id></td>"));
    }

    #[test]
    fn test_numbers_have_two_decimals() {
        let rows = [row("A01", "Alice", 66.666, 59.5, "C")];
        assert!(build_markdown_report(&rows).contains("| 66.67 | 59.50 |"));
        assert!(build_html_report(&rows).contains("<td>66.67</td><td>59.50</td>"));
    }

    #[test]
    fn test_empty_rows_keep_header() {
        let md = build_markdown_report(&[]);
        assert!(md.contains("| Student ID |"));
        assert_eq!(md.lines().count(), 4);

        let html = build_html_report(&[]);
        assert!(html.contains("<thead>"));
        assert!(!html.contains("<td>"));
    }
}
