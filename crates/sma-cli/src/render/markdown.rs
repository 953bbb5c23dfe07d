use std::fmt::Write as _;

use sma_core::{ChartBoard, CreatorPanel, ReportDetail, ReportView, Sentiment, EMPTY_BUCKET_MESSAGE};

pub(super) fn render(view: &ReportView, charts: &ChartBoard, filter: Sentiment) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Sentiment Report");
    out.push('\n');
    let _ = writeln!(out, "**Title**: {}", cell(&view.title));
    let _ = writeln!(out, "**Analyzed**: {}", view.formatted_timestamp());
    let _ = writeln!(out, "**Comments**: {}", view.counts.total);
    out.push('\n');
    let _ = writeln!(out, "---");
    out.push('\n');

    match &view.detail {
        ReportDetail::Creator(panel) => write_creator(&mut out, panel),
        ReportDetail::Standard {
            brand_score: Some(panel),
        } => {
            let _ = writeln!(out, "## Brand Score");
            out.push('\n');
            let _ = writeln!(
                out,
                "**{}** ({}): {}",
                panel.percent_label(),
                panel.tone.name(),
                cell(&panel.recommendation)
            );
            out.push('\n');
        }
        ReportDetail::Standard { brand_score: None } => {}
    }

    let _ = writeln!(out, "## Breakdown");
    out.push('\n');
    let _ = writeln!(out, "| Sentiment | Count | Share |");
    let _ = writeln!(out, "|-----------|-------|-------|");
    if let Some(pie) = charts.pie() {
        for (index, label) in pie.labels.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {label} | {} | {:.1}% |",
                pie.values[index],
                pie.share(index)
            );
        }
    }
    let _ = writeln!(out, "| Total | {} | |", view.counts.total);
    out.push('\n');

    let _ = writeln!(out, "## {} Comments", filter.label());
    out.push('\n');
    let comments = view.comments_for(filter);
    if comments.is_empty() {
        let _ = writeln!(out, "_{EMPTY_BUCKET_MESSAGE}_");
    }
    for comment in comments {
        let _ = writeln!(out, "- {}", cell(comment));
    }

    out
}

fn write_creator(out: &mut String, panel: &CreatorPanel) {
    let _ = writeln!(out, "## Creator: {}", cell(&panel.creator_name));
    out.push('\n');
    let _ = writeln!(
        out,
        "**{}** ({})",
        panel.recommendation_title,
        panel.tone.name()
    );
    if !panel.recommendation_detail.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", panel.recommendation_detail);
    }
    out.push('\n');
    let _ = writeln!(out, "- **Overall safety**: {}", panel.safety_label());
    if let Some(positive) = panel.positive_percentage {
        let _ = writeln!(out, "- **Positive share**: {positive}%");
    }
    let _ = writeln!(out, "- **Cult following**: {}", panel.cult_following);
    out.push('\n');

    let _ = writeln!(out, "| Platform | Safety |");
    let _ = writeln!(out, "|----------|--------|");
    for row in &panel.platforms {
        let _ = writeln!(out, "| {} | {} |", row.platform.label(), row.safety);
    }
    out.push('\n');

    if !panel.sources.is_empty() {
        let _ = writeln!(out, "| Source | Platform | Positive | Negative | Neutral |");
        let _ = writeln!(out, "|--------|----------|----------|----------|---------|");
        for source in &panel.sources {
            let summary = &source.sentiment_summary;
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                source_link(&source.title, &source.url),
                cell(&source.platform),
                summary.positive,
                summary.negative,
                summary.neutral
            );
        }
        out.push('\n');
    }

    if !panel.errors.is_empty() {
        let _ = writeln!(out, "**Fetch errors**:");
        out.push('\n');
        for error in &panel.errors {
            let _ = writeln!(out, "- {}", cell(error));
        }
        out.push('\n');
    }
}

/// Manual sources carry the placeholder url `manual` and get no link.
fn source_link(title: &str, url: &str) -> String {
    if url.is_empty() || url == "manual" {
        cell(title)
    } else {
        format!("[{}]({})", cell(title), cell(url))
    }
}

/// Keep comment text on one line and out of table syntax.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
