use std::fmt::Write as _;

use sma_core::{
    escape_html, render_comment_list, ChartBoard, ChartSpec, CreatorPanel, ReportDetail,
    ReportView, Sentiment, Tone,
};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;color:#0f172a}\
.panel{border-left:4px solid;padding:1rem;margin:1rem 0;border-radius:6px}\
.stats{display:flex;gap:1rem}.stat{flex:1;padding:1rem;background:#f1f5f9;border-radius:6px}\
.bar-track{background:#e2e8f0;height:10px;border-radius:5px}\
.bar-fill{height:10px;border-radius:5px}\
table{border-collapse:collapse;width:100%}td,th{padding:.4rem;border-bottom:1px solid #e2e8f0;text-align:left}\
.comment-item{padding:.5rem;margin:.25rem 0;border-radius:4px;background:#f8fafc}\
.comment-item.positive{border-left:3px solid #10b981}\
.comment-item.negative{border-left:3px solid #ef4444}\
.comment-item.neutral{border-left:3px solid #f59e0b}\
.comment-empty{color:#64748b}";

pub(super) fn render(view: &ReportView, charts: &ChartBoard, filter: Sentiment) -> String {
    let title = escape_html(&view.title);
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{title} - Sentiment Report</title>");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(
        out,
        "<p class=\"timestamp\">Analyzed {}</p>",
        escape_html(&view.formatted_timestamp())
    );

    match &view.detail {
        ReportDetail::Creator(panel) => write_creator(&mut out, panel),
        ReportDetail::Standard {
            brand_score: Some(panel),
        } => {
            let _ = writeln!(
                out,
                "<section class=\"panel brand-score\" style=\"border-color:{}\">",
                Tone::Muted.hex()
            );
            let _ = writeln!(out, "<h2>Brand Score {}</h2>", panel.percent_label());
            let _ = writeln!(
                out,
                "<div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:{}%;background:{}\"></div></div>",
                panel.bar_fill(),
                panel.tone.hex()
            );
            let _ = writeln!(
                out,
                "<p class=\"recommendation\" style=\"color:{}\">{}</p>",
                panel.tone.hex(),
                escape_html(&panel.recommendation)
            );
            let _ = writeln!(out, "</section>");
        }
        ReportDetail::Standard { brand_score: None } => {}
    }

    let _ = writeln!(out, "<div class=\"stats\">");
    let _ = writeln!(
        out,
        "<div class=\"stat\" id=\"totalCount\"><strong>{}</strong> Total</div>",
        view.counts.total
    );
    for sentiment in Sentiment::ALL {
        let _ = writeln!(
            out,
            "<div class=\"stat\" id=\"{}Count\"><strong>{}</strong> {}</div>",
            sentiment.as_str(),
            view.counts.get(sentiment),
            sentiment.label()
        );
    }
    let _ = writeln!(out, "</div>");

    if let Some(spec) = charts.bar() {
        write_bar_chart(&mut out, spec);
    }
    if let Some(spec) = charts.pie() {
        write_pie_legend(&mut out, spec);
    }

    let _ = writeln!(out, "<h2>{} Comments</h2>", filter.label());
    let _ = writeln!(out, "<div id=\"commentsList\">");
    let _ = writeln!(out, "{}", render_comment_list(view, filter));
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");

    out
}

fn write_creator(out: &mut String, panel: &CreatorPanel) {
    let _ = writeln!(
        out,
        "<section class=\"panel recommendation\" style=\"border-color:{};background:{}\">",
        panel.tone.hex(),
        panel.tone.background()
    );
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&panel.creator_name));
    let _ = writeln!(
        out,
        "<h3 style=\"color:{}\">{}</h3>",
        panel.tone.hex(),
        escape_html(&panel.recommendation_title)
    );
    let _ = writeln!(out, "<p>{}</p>", escape_html(&panel.recommendation_detail));
    let _ = writeln!(
        out,
        "<p>Overall safety <strong>{}</strong></p>",
        panel.safety_label()
    );
    if let Some(positive) = panel.positive_percentage {
        let _ = writeln!(out, "<p>Positive share <strong>{positive}%</strong></p>");
    }
    let _ = writeln!(
        out,
        "<p>Cult following <strong>{}</strong></p>",
        escape_html(&panel.cult_following)
    );
    let _ = writeln!(out, "</section>");

    let _ = writeln!(out, "<table class=\"platforms\">");
    let _ = writeln!(out, "<tr><th>Platform</th><th>Safety</th></tr>");
    for row in &panel.platforms {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td style=\"color:{}\">{}</td></tr>",
            row.platform.label(),
            row.tone.hex(),
            row.safety
        );
    }
    let _ = writeln!(out, "</table>");

    if !panel.sources.is_empty() {
        let _ = writeln!(out, "<table class=\"sources\">");
        let _ = writeln!(
            out,
            "<tr><th>Source</th><th>Platform</th><th>Positive</th><th>Negative</th><th>Neutral</th></tr>"
        );
        for source in &panel.sources {
            let summary = &source.sentiment_summary;
            let _ = writeln!(
                out,
                "<tr><td title=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&source.url),
                escape_html(&source.title),
                escape_html(&source.platform),
                summary.positive,
                summary.negative,
                summary.neutral
            );
        }
        let _ = writeln!(out, "</table>");
    }

    if !panel.errors.is_empty() {
        let _ = writeln!(out, "<ul class=\"fetch-errors\">");
        for error in &panel.errors {
            let _ = writeln!(out, "<li>{}</li>", escape_html(error));
        }
        let _ = writeln!(out, "</ul>");
    }
}

fn write_bar_chart(out: &mut String, spec: &ChartSpec) {
    let max = spec.values.iter().copied().max().unwrap_or(0);
    let _ = writeln!(out, "<figure id=\"barChart\">");
    for (index, label) in spec.labels.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let width = if max == 0 {
            0.0
        } else {
            spec.values[index] as f64 / max as f64 * 100.0
        };
        let _ = writeln!(
            out,
            "<div>{label} {}<div class=\"bar-track\"><div class=\"bar-fill\" style=\"width:{width:.1}%;background:{}\"></div></div></div>",
            spec.values[index],
            slice_color(index)
        );
    }
    let _ = writeln!(out, "</figure>");
}

fn write_pie_legend(out: &mut String, spec: &ChartSpec) {
    let _ = writeln!(out, "<ul id=\"pieChart\">");
    for index in 0..spec.labels.len() {
        let _ = writeln!(
            out,
            "<li style=\"color:{}\">{}</li>",
            slice_color(index),
            spec.tooltip(index)
        );
    }
    let _ = writeln!(out, "</ul>");
}

/// Slice colors follow `Sentiment::ALL` order.
fn slice_color(index: usize) -> &'static str {
    match index {
        0 => Tone::Good.hex(),
        1 => Tone::Danger.hex(),
        _ => Tone::Warning.hex(),
    }
}
