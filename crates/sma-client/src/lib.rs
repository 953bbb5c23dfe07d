//! HTTP client for the remote sentiment analysis service.
//!
//! Every ingestion endpoint answers with a session id; the session itself is
//! fetched later by id. Non-success responses carry `{"error": "..."}` and are
//! surfaced as [`ClientError::Api`] with the service's message intact.

pub mod client;
pub mod error;
pub mod types;

pub use client::AnalysisClient;
pub use error::ClientError;
pub use types::SubmitResponse;
