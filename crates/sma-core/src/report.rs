//! Report model for a fetched session.
//!
//! A [`ReportView`] is built once per successful fetch and then passed by
//! reference to every renderer, filter, and export. Single and creator
//! sessions arrive in different shapes; both are reconciled here.

use chrono::{DateTime, NaiveDateTime};

use crate::types::{
    CommentBuckets, CreatorReport, Platform, PlatformStats, Sentiment, SentimentCounts,
    SessionKind, SingleSession, SourceSummary,
};

/// Placeholder shown when the selected bucket has no comments.
pub const EMPTY_BUCKET_MESSAGE: &str = "No comments in this category";

/// Color role used for panels, scores, and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warning,
    Danger,
    Muted,
}

impl Tone {
    /// Panel tone for a creator recommendation category.
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        match category {
            "excellent" => Tone::Good,
            "good" => Tone::Warning,
            _ => Tone::Danger,
        }
    }

    /// Recommendation tone for a single-source brand score.
    #[must_use]
    pub fn for_brand_score(score: f64) -> Self {
        if score > 80.0 {
            Tone::Good
        } else {
            Tone::Warning
        }
    }

    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Tone::Good => "#10b981",
            Tone::Warning => "#f59e0b",
            Tone::Danger => "#ef4444",
            Tone::Muted => "#64748b",
        }
    }

    /// Translucent panel background matching [`Tone::hex`].
    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            Tone::Good => "rgba(16, 185, 129, 0.1)",
            Tone::Warning => "rgba(245, 158, 11, 0.1)",
            Tone::Danger => "rgba(239, 68, 68, 0.1)",
            Tone::Muted => "rgba(100, 116, 139, 0.1)",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tone::Good => "green",
            Tone::Warning => "amber",
            Tone::Danger => "red",
            Tone::Muted => "gray",
        }
    }
}

/// Brand score panel of a single-source report.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandScorePanel {
    pub score: f64,
    pub recommendation: String,
    pub tone: Tone,
}

impl BrandScorePanel {
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.score)
    }

    /// Bar fill as a percentage of the bar's width, clamped to `0..=100`.
    #[must_use]
    pub fn bar_fill(&self) -> f64 {
        self.score.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRow {
    pub platform: Platform,
    pub safety: String,
    pub tone: Tone,
}

/// Creator-only part of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorPanel {
    pub creator_name: String,
    pub recommendation_title: String,
    pub recommendation_detail: String,
    pub tone: Tone,
    pub overall_score: f64,
    pub positive_percentage: Option<f64>,
    pub cult_following: String,
    pub platforms: Vec<PlatformRow>,
    pub sources: Vec<SourceSummary>,
    pub errors: Vec<String>,
}

impl CreatorPanel {
    #[must_use]
    pub fn safety_label(&self) -> String {
        format!("{}%", self.overall_score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportDetail {
    Standard { brand_score: Option<BrandScorePanel> },
    Creator(CreatorPanel),
}

/// Everything the results renderers need, built from one fetched session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub kind: SessionKind,
    pub title: String,
    /// Timestamp exactly as the service sent it.
    pub timestamp: String,
    pub counts: SentimentCounts,
    pub comments: CommentBuckets,
    pub detail: ReportDetail,
}

impl ReportView {
    #[must_use]
    pub fn from_single(session: SingleSession) -> Self {
        let results = session.results;
        let brand_score = results.brand_score.map(|score| BrandScorePanel {
            score,
            recommendation: results.brand_recommendation.clone().unwrap_or_default(),
            tone: Tone::for_brand_score(score),
        });

        Self {
            kind: SessionKind::Single,
            title: session.title,
            timestamp: session.timestamp,
            counts: results.counts,
            comments: results.comments,
            detail: ReportDetail::Standard { brand_score },
        }
    }

    /// Creator reports carry no counts object; counts come from the bucket
    /// lengths and the reported `total_count`.
    #[must_use]
    pub fn from_creator(report: CreatorReport) -> Self {
        let stats = report.stats;
        let analysis = report.business_analysis;
        let counts = stats.comments.counts_with_total(stats.total_count);

        let mut platforms = vec![
            platform_row(Platform::Youtube, &stats.platform_breakdown.youtube),
            platform_row(Platform::Reddit, &stats.platform_breakdown.reddit),
        ];
        if stats.platform_breakdown.other.total > 0 {
            platforms.push(platform_row(Platform::Other, &stats.platform_breakdown.other));
        }

        let panel = CreatorPanel {
            creator_name: report.creator_name.clone(),
            recommendation_title: analysis.recommendation_title,
            recommendation_detail: analysis.recommendation_detail,
            tone: Tone::for_category(&analysis.category),
            overall_score: analysis.overall_score,
            positive_percentage: analysis.positive_percentage,
            cult_following: analysis
                .cult_following_indicator
                .unwrap_or_else(|| "N/A".to_string()),
            platforms,
            sources: stats.sources,
            errors: report.errors,
        };

        Self {
            kind: SessionKind::Creator,
            title: report.creator_name,
            timestamp: report.timestamp,
            counts,
            comments: stats.comments,
            detail: ReportDetail::Creator(panel),
        }
    }

    #[must_use]
    pub fn comments_for(&self, sentiment: Sentiment) -> &[String] {
        self.comments.bucket(sentiment)
    }

    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

fn platform_row(platform: Platform, stats: &PlatformStats) -> PlatformRow {
    let safety = platform_safety_label(stats);
    let tone = if stats.total == 0 {
        Tone::Muted
    } else {
        Tone::Good
    };
    PlatformRow {
        platform,
        safety,
        tone,
    }
}

/// Share of a platform's comments that are positive or neutral, as `"NN.N%"`,
/// or `"N/A"` when the platform has no comments.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn platform_safety_label(stats: &PlatformStats) -> String {
    if stats.total == 0 {
        return "N/A".to_string();
    }
    let safe = (stats.positive + stats.neutral) as f64 / stats.total as f64 * 100.0;
    format!("{safe:.1}%")
}

/// Render a service timestamp for display. Accepts RFC 3339 and the naive
/// ISO form the service emits; anything else is shown unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Data handed to a chart renderer: three category labels and their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: [&'static str; 3],
    pub values: [usize; 3],
}

impl ChartSpec {
    #[must_use]
    pub fn new(kind: ChartKind, counts: &SentimentCounts) -> Self {
        Self {
            kind,
            labels: Sentiment::ALL.map(Sentiment::label),
            values: Sentiment::ALL.map(|s| counts.get(s)),
        }
    }

    #[must_use]
    pub fn sum(&self) -> usize {
        self.values.iter().sum()
    }

    /// Percentage of the chart's own sum held by slice `index`. Zero when
    /// every slice is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, index: usize) -> f64 {
        let sum = self.sum();
        if sum == 0 {
            return 0.0;
        }
        self.values[index] as f64 / sum as f64 * 100.0
    }

    /// Pie tooltip text, e.g. `"Positive: 5 (50.0%)"`.
    #[must_use]
    pub fn tooltip(&self, index: usize) -> String {
        format!(
            "{}: {} ({:.1}%)",
            self.labels[index],
            self.values[index],
            self.share(index)
        )
    }
}

/// Holds at most one chart per canvas. Rebuilding replaces the previous
/// chart so repeated loads never stack renders.
#[derive(Debug, Default)]
pub struct ChartBoard {
    bar: Option<ChartSpec>,
    pie: Option<ChartSpec>,
}

impl ChartBoard {
    pub fn rebuild(&mut self, counts: &SentimentCounts) {
        if let Some(old) = self.bar.replace(ChartSpec::new(ChartKind::Bar, counts)) {
            tracing::debug!(values = ?old.values, "replaced bar chart");
        }
        if let Some(old) = self.pie.replace(ChartSpec::new(ChartKind::Pie, counts)) {
            tracing::debug!(values = ?old.values, "replaced pie chart");
        }
    }

    #[must_use]
    pub fn bar(&self) -> Option<&ChartSpec> {
        self.bar.as_ref()
    }

    #[must_use]
    pub fn pie(&self) -> Option<&ChartSpec> {
        self.pie.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Comment list
// ---------------------------------------------------------------------------

/// Escape text for safe inclusion in HTML element content or attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make service-supplied text safe to print to a terminal. Line breaks become
/// spaces and every other control character except tab (including ESC and
/// C1 codes) becomes U+FFFD, so no escape sequence reaches the terminal.
#[must_use]
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => c,
            '\n' | '\r' => ' ',
            c if c.is_control() => '\u{fffd}',
            c => c,
        })
        .collect()
}

/// Render the selected bucket as HTML fragments, one `div` per comment.
/// Reads only from `view`, so switching filters never needs a re-fetch.
#[must_use]
pub fn render_comment_list(view: &ReportView, sentiment: Sentiment) -> String {
    let comments = view.comments_for(sentiment);
    if comments.is_empty() {
        return format!("<p class=\"comment-empty\">{EMPTY_BUCKET_MESSAGE}</p>");
    }

    comments
        .iter()
        .map(|comment| {
            format!(
                "<div class=\"comment-item {sentiment}\">{}</div>",
                escape_html(comment)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
