use thiserror::Error;

/// Errors returned by [`crate::AnalysisClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete (connect, TLS, timeout, body read).
    #[error("Network Error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status. `message` is the
    /// service's `error` field when present, else the status line.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid service base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// `true` when the service reported that the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}
