//! CSV export of the submissions report.
//!
//! Flattens the paired report into one row per (submission, question) pair
//! for spreadsheet use. Checkbox answers keep their stored representation
//! rather than a prettified option list.

use crate::domain::{Answer, SubmissionReport};

/// CSV header row.
const CSV_HEADER: &str = "Submission ID,Submitted At,Question,Answer,Type";

/// Flatten a report into CSV text.
#[must_use]
pub fn report_to_csv(report: &SubmissionReport) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];

    for submission in &report.submissions {
        let submitted_at = submission.submitted_at.to_rfc3339();
        for paired in &submission.responses {
            let row = [
                quote(&submission.submission_id),
                quote(&submitted_at),
                quote(&paired.question),
                quote(&answer_cell(paired.answer.as_ref())),
                quote(paired.field_type.as_str()),
            ];
            lines.push(row.join(","));
        }
    }

    lines.join("\n")
}

/// Suggested download filename for a form's export.
#[must_use]
pub fn csv_filename(form_title: &str) -> String {
    format!("{form_title}_submissions.csv")
}

fn answer_cell(answer: Option<&Answer>) -> String {
    match answer {
        None => String::new(),
        Some(Answer::Scalar(value)) => value.clone(),
        Some(Answer::Checks(map)) => serde_json::to_string(map).unwrap_or_default(),
    }
}

/// Quote a cell, doubling embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
