//! Core types and client-side logic for the SMA sentiment client.
//!
//! Everything here is pure: input validation and payload building for the
//! ingestion commands, the report model built from a fetched session, chart
//! and comment-list rendering, CSV export, and the small on-disk store that
//! remembers which session to show next. Network access lives in `sma-client`.

pub mod app_config;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod intake;
pub mod report;
pub mod store;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, validate_api_base};
pub use error::{ConfigError, StoreError, ValidationError};
pub use export::{export_csv, export_file_name};
pub use form::{identify_platform, CreatorForm, InputMode, ModeView, RowId};
pub use intake::{
    csv_request, parse_csv_comments, parse_text_comments, text_request, url_request,
    AnalyzeRequest, AnalyzeUrlRequest, CreatorAnalyzeRequest, ManualSourceEntry,
    DEFAULT_TITLE, MANUAL_ENTRY_TITLE,
};
pub use report::{
    escape_html, platform_safety_label, render_comment_list, sanitize_terminal, BrandScorePanel,
    ChartBoard, ChartKind, ChartSpec, CreatorPanel, PlatformRow, ReportDetail, ReportView, Tone,
    EMPTY_BUCKET_MESSAGE,
};
pub use store::SessionStore;
pub use types::{
    BusinessAnalysis, CommentBuckets, CreatorReport, CreatorSession, CreatorStats,
    ManualPlatform, Platform, PlatformBreakdown, PlatformStats, Sentiment, SentimentCounts,
    SessionKind, SingleResults, SingleSession, SourceSummary,
};
