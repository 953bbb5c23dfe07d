//! Report renderers for `sma show`.

mod html;
mod markdown;
mod text;

use clap::ValueEnum;

use sma_core::{ChartBoard, ReportView, Sentiment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Plain terminal report
    Text,
    /// Markdown tables
    Markdown,
    /// Standalone HTML page
    Html,
}

/// Render `view` with the comment list narrowed to `filter`.
pub(crate) fn render(view: &ReportView, filter: Sentiment, format: OutputFormat) -> String {
    let mut charts = ChartBoard::default();
    charts.rebuild(&view.counts);

    match format {
        OutputFormat::Text => text::render(view, &charts, filter),
        OutputFormat::Markdown => markdown::render(view, &charts, filter),
        OutputFormat::Html => html::render(view, &charts, filter),
    }
}
