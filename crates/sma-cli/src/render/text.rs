use std::fmt::Write as _;

use sma_core::{
    sanitize_terminal as clean, ChartBoard, ChartSpec, CreatorPanel, ReportDetail, ReportView,
    Sentiment, EMPTY_BUCKET_MESSAGE,
};

const BAR_WIDTH: usize = 30;

pub(super) fn render(view: &ReportView, charts: &ChartBoard, filter: Sentiment) -> String {
    let mut out = String::new();

    let title = clean(&view.title);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(8)));
    let _ = writeln!(out, "Analyzed: {}", clean(&view.formatted_timestamp()));
    out.push('\n');

    match &view.detail {
        ReportDetail::Creator(panel) => write_creator_panel(&mut out, panel),
        ReportDetail::Standard {
            brand_score: Some(panel),
        } => {
            let _ = writeln!(
                out,
                "Brand score: {} [{}] {}",
                panel.percent_label(),
                bar(panel.bar_fill(), 100.0),
                panel.tone.name()
            );
            let _ = writeln!(out, "Recommendation: {}", clean(&panel.recommendation));
            out.push('\n');
        }
        ReportDetail::Standard { brand_score: None } => {}
    }

    let _ = writeln!(
        out,
        "Total: {}  Positive: {}  Negative: {}  Neutral: {}",
        view.counts.total, view.counts.positive, view.counts.negative, view.counts.neutral
    );
    out.push('\n');

    if let Some(spec) = charts.bar() {
        write_bar_chart(&mut out, spec);
    }
    if let Some(spec) = charts.pie() {
        let _ = writeln!(out, "Distribution");
        for index in 0..spec.labels.len() {
            let _ = writeln!(out, "  {}", spec.tooltip(index));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{} comments", filter.label());
    let comments = view.comments_for(filter);
    if comments.is_empty() {
        let _ = writeln!(out, "  {EMPTY_BUCKET_MESSAGE}");
    }
    for comment in comments {
        let _ = writeln!(out, "  - {}", clean(comment));
    }

    out
}

fn write_creator_panel(out: &mut String, panel: &CreatorPanel) {
    let _ = writeln!(out, "Creator: {}", clean(&panel.creator_name));
    let _ = writeln!(
        out,
        "{} ({})",
        clean(&panel.recommendation_title),
        panel.tone.name()
    );
    if !panel.recommendation_detail.is_empty() {
        let _ = writeln!(out, "  {}", clean(&panel.recommendation_detail));
    }
    let _ = writeln!(out, "Overall safety: {}", panel.safety_label());
    if let Some(positive) = panel.positive_percentage {
        let _ = writeln!(out, "Positive share: {positive}%");
    }
    let _ = writeln!(out, "Cult following: {}", clean(&panel.cult_following));
    out.push('\n');

    let _ = writeln!(out, "{:<12}SAFETY", "PLATFORM");
    for row in &panel.platforms {
        let _ = writeln!(out, "{:<12}{}", row.platform.label(), row.safety);
    }
    out.push('\n');

    if !panel.sources.is_empty() {
        let _ = writeln!(out, "{:<10}{:<8}{:<8}{:<8}SOURCE", "PLATFORM", "POS", "NEG", "NEU");
        for source in &panel.sources {
            let summary = &source.sentiment_summary;
            let _ = writeln!(
                out,
                "{:<10}{:<8}{:<8}{:<8}{} ({})",
                clean(&source.platform),
                summary.positive,
                summary.negative,
                summary.neutral,
                clean(&source.title),
                clean(&source.url)
            );
        }
        out.push('\n');
    }

    if !panel.errors.is_empty() {
        let _ = writeln!(out, "Sources that could not be fetched:");
        for error in &panel.errors {
            let _ = writeln!(out, "  ! {}", clean(error));
        }
        out.push('\n');
    }
}

fn write_bar_chart(out: &mut String, spec: &ChartSpec) {
    let max = spec.values.iter().copied().max().unwrap_or(0);
    let _ = writeln!(out, "Counts");
    for (label, value) in spec.labels.iter().zip(spec.values) {
        #[allow(clippy::cast_precision_loss)]
        let (value_f, max_f) = (value as f64, max as f64);
        let _ = writeln!(out, "  {label:<9}{} {value}", bar(value_f, max_f));
    }
    out.push('\n');
}

/// Fixed-width bar of `#` proportional to `value / max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(value: f64, max: f64) -> String {
    let filled = if max <= 0.0 {
        0
    } else {
        ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    };
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
