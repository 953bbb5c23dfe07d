//! Input preparation for the single-source ingestion commands.
//!
//! Turns raw user input into the request bodies the analysis service
//! expects. All checks here run before any request is made.

use serde::{Deserialize, Serialize};

use crate::types::ManualPlatform;
use crate::ValidationError;

/// Title sent when the user leaves the title blank.
pub const DEFAULT_TITLE: &str = "Untitled Analysis";

/// Fixed label attached to every manual-entry source.
pub const MANUAL_ENTRY_TITLE: &str = "Manual Entry";

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub comments: Vec<String>,
    pub title: String,
}

/// Body of `POST /api/analyze-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
}

/// One manually pasted block of comments in a creator request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSourceEntry {
    pub platform: ManualPlatform,
    pub text: String,
    pub title: String,
}

/// Body of `POST /api/creator/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorAnalyzeRequest {
    pub name: String,
    pub urls: Vec<String>,
    pub manual_data: Vec<ManualSourceEntry>,
}

/// Split pasted text into comments: one per line, trimmed, blanks dropped,
/// order preserved.
#[must_use]
pub fn parse_text_comments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Extract comments from an uploaded CSV file.
///
/// This is a line splitter, not a CSV parser: each non-blank trimmed line is
/// one comment and commas or quotes inside a line are kept as-is. The first
/// line is treated as a header and dropped only when it contains `comment`
/// in any case.
#[must_use]
pub fn parse_csv_comments(content: &str) -> Vec<String> {
    let mut lines = parse_text_comments(content);
    let has_header = lines
        .first()
        .is_some_and(|first| first.to_lowercase().contains("comment"));
    if has_header {
        lines.remove(0);
    }
    lines
}

/// Build the request for pasted text.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`] when the text is blank and
/// [`ValidationError::NoComments`] when no non-empty line remains.
pub fn text_request(text: &str, title: &str) -> Result<AnalyzeRequest, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let comments = parse_text_comments(text);
    if comments.is_empty() {
        return Err(ValidationError::NoComments);
    }
    Ok(AnalyzeRequest {
        comments,
        title: title_or_default(title),
    })
}

/// Build the request for a single URL. The URL's shape is left to the service.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUrl`] when the URL is blank.
pub fn url_request(url: &str) -> Result<AnalyzeUrlRequest, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    Ok(AnalyzeUrlRequest {
        url: url.to_string(),
    })
}

/// Build the request for an uploaded CSV file, titled after the file name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyCsv`] when no comment survives filtering.
pub fn csv_request(content: &str, file_name: &str) -> Result<AnalyzeRequest, ValidationError> {
    let comments = parse_csv_comments(content);
    if comments.is_empty() {
        return Err(ValidationError::EmptyCsv);
    }
    Ok(AnalyzeRequest {
        comments,
        title: title_or_default(&file_name.replacen(".csv", "", 1)),
    })
}

fn title_or_default(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}
