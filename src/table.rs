//! Plain-text recap table for the terminal.

use student_tracker::RecapRow;

const HEADERS: [&str; 5] = ["Student ID", "Name", "Attendance (%)", "Final Score", "Grade"];

/// Formats rows as an aligned text table with a title line.
pub fn format_recap(title: &str, rows: &[RecapRow]) -> String {
    if rows.is_empty() {
        return "No students to show.".to_string();
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.identifier.clone(),
                r.name.clone(),
                format!("{:.2}", r.attendance),
                format!("{:.2}", r.final_score),
                r.letter_grade.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![title.to_string(), format_line(&HEADERS.map(String::from), &widths)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(cells.iter().map(|line| format_line(line, &widths)));
    out.join("\n")
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            // attendance and score columns are right-aligned
            if i == 2 || i == 3 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_recap_alignment() {
        let rows = vec![RecapRow {
            identifier: "A01".to_string(),
            name: "Alice".to_string(),
            attendance: 90.0,
            final_score: 60.0,
            letter_grade: "C".to_string(),
        }];
        let table = format_recap("Recap", &rows);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "Recap");
        assert_eq!(lines[1], "Student ID | Name  | Attendance (%) | Final Score | Grade");
        assert_eq!(lines[3], "A01        | Alice |          90.00 |       60.00 | C    ");
    }

    #[test]
    fn test_format_recap_empty() {
        assert_eq!(format_recap("Recap", &[]), "No students to show.");
    }
}
