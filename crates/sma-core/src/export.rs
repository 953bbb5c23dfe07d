//! CSV export of a report.

use std::fmt::Write as _;

use crate::report::ReportView;
use crate::types::Sentiment;

/// Serialize the report's counts and every comment bucket to CSV.
///
/// Four summary rows (three categories plus total) come first, then a blank
/// line and one `sentiment,"comment"` row per comment. Comments are always
/// quoted with embedded quotes doubled.
#[must_use]
pub fn export_csv(view: &ReportView) -> String {
    let counts = &view.counts;
    let mut csv = String::from("Sentiment,Count\n");
    for sentiment in Sentiment::ALL {
        let _ = writeln!(csv, "{},{}", sentiment.label(), counts.get(sentiment));
    }
    let _ = writeln!(csv, "Total,{}", counts.total);
    csv.push('\n');

    csv.push_str("Sentiment,Comment\n");
    for sentiment in Sentiment::ALL {
        for comment in view.comments_for(sentiment) {
            let _ = writeln!(csv, "{sentiment},\"{}\"", comment.replace('"', "\"\""));
        }
    }
    csv
}

/// Download name for an export: every character outside `[A-Za-z0-9]` in the
/// title becomes `_`, followed by `_analysis.csv`.
#[must_use]
pub fn export_file_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}_analysis.csv")
}
