//! Wire types for the analysis service's session payloads.
//!
//! The service returns two different shapes from `GET /api/session/:id`:
//! single-source sessions carry their counts directly, creator sessions
//! carry only the comment buckets plus a total. Both are deserialized
//! leniently since the client only ever reads them.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One of the three sentiment categories the service sorts comments into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[default]
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Display order used by charts, stat cards, and exports.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Capitalized label used for chart categories and CSV summary rows.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of analysis a stored session id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    Single,
    Creator,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Single => write!(f, "single"),
            SessionKind::Creator => write!(f, "creator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: usize,
    #[serde(default)]
    pub negative: usize,
    #[serde(default)]
    pub neutral: usize,
    #[serde(default)]
    pub total: usize,
}

impl SentimentCounts {
    #[must_use]
    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

/// Raw comments grouped by sentiment, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentBuckets {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

impl CommentBuckets {
    #[must_use]
    pub fn bucket(&self, sentiment: Sentiment) -> &[String] {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
        }
    }

    /// Counts derived from bucket lengths, with `total` supplied by the caller.
    #[must_use]
    pub fn counts_with_total(&self, total: usize) -> SentimentCounts {
        SentimentCounts {
            positive: self.positive.len(),
            negative: self.negative.len(),
            neutral: self.neutral.len(),
            total,
        }
    }
}

// ---------------------------------------------------------------------------
// Single-source sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResults {
    pub counts: SentimentCounts,
    #[serde(default)]
    pub brand_score: Option<f64>,
    #[serde(default)]
    pub brand_recommendation: Option<String>,
    #[serde(flatten)]
    pub comments: CommentBuckets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSession {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub timestamp: String,
    pub results: SingleResults,
}

// ---------------------------------------------------------------------------
// Creator sessions
// ---------------------------------------------------------------------------

/// Content platforms the service breaks creator stats down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Reddit,
    Other,
}

impl Platform {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Reddit => "Reddit",
            Platform::Other => "Other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Youtube => write!(f, "youtube"),
            Platform::Reddit => write!(f, "reddit"),
            Platform::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformStats {
    #[serde(default)]
    pub positive: usize,
    #[serde(default)]
    pub negative: usize,
    #[serde(default)]
    pub neutral: usize,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    #[serde(default)]
    pub youtube: PlatformStats,
    #[serde(default)]
    pub reddit: PlatformStats,
    #[serde(default)]
    pub other: PlatformStats,
}

impl PlatformBreakdown {
    #[must_use]
    pub fn stats(&self, platform: Platform) -> &PlatformStats {
        match platform {
            Platform::Youtube => &self.youtube,
            Platform::Reddit => &self.reddit,
            Platform::Other => &self.other,
        }
    }
}

/// One analysed source (a fetched URL or a manual paste) within a creator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub sentiment_summary: SentimentCounts,
}

/// Business recommendation computed by the service. Every field is display-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessAnalysis {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub positive_percentage: Option<f64>,
    #[serde(default)]
    pub recommendation_title: String,
    #[serde(default)]
    pub recommendation_detail: String,
    #[serde(default)]
    pub cult_following_indicator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatorStats {
    #[serde(flatten)]
    pub comments: CommentBuckets,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub platform_breakdown: PlatformBreakdown,
    #[serde(default)]
    pub sources: Vec<SourceSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorReport {
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub business_analysis: BusinessAnalysis,
    pub stats: CreatorStats,
    /// Per-URL fetch failures the service tolerated while building the report.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Envelope the service wraps creator reports in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSession {
    pub data: CreatorReport,
}

// ---------------------------------------------------------------------------
// Manual entries
// ---------------------------------------------------------------------------

/// Platform tag a manual-entry row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualPlatform {
    #[default]
    Instagram,
    Tiktok,
    Twitter,
    Other,
}

impl std::str::FromStr for ManualPlatform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(ManualPlatform::Instagram),
            "tiktok" => Ok(ManualPlatform::Tiktok),
            "twitter" | "x" => Ok(ManualPlatform::Twitter),
            "other" => Ok(ManualPlatform::Other),
            _ => Err(ValidationError::UnknownPlatform(s.to_string())),
        }
    }
}

impl std::fmt::Display for ManualPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManualPlatform::Instagram => write!(f, "instagram"),
            ManualPlatform::Tiktok => write!(f, "tiktok"),
            ManualPlatform::Twitter => write!(f, "twitter"),
            ManualPlatform::Other => write!(f, "other"),
        }
    }
}
