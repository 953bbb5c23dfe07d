//! HTTP client for the analysis service's REST endpoints.
//!
//! Wraps `reqwest` with typed request/response bodies and the service's
//! `{"error": ...}` convention. No request is ever retried: a failure is
//! returned to the caller as-is.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sma_core::{
    AnalyzeRequest, AnalyzeUrlRequest, CreatorAnalyzeRequest, CreatorReport, CreatorSession,
    SingleSession,
};

use crate::error::ClientError;
use crate::types::{ErrorBody, SubmitResponse};

/// Client for the analysis service.
///
/// Use [`AnalysisClient::new`] with the configured base address; tests point
/// it at a wiremock server the same way.
pub struct AnalysisClient {
    client: Client,
    base_url: Url,
}

impl AnalysisClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot carry a path.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative joins append to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Submits pasted or uploaded comments (`POST /api/analyze`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the service rejects the request.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the success body has no `session_id`.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<SubmitResponse, ClientError> {
        self.send_json(Method::POST, &["api", "analyze"], Some(request), "Analysis failed.")
            .await
    }

    /// Asks the service to fetch and analyze comments at a URL
    /// (`POST /api/analyze-url`).
    ///
    /// # Errors
    ///
    /// See [`AnalysisClient::analyze`].
    pub async fn analyze_url(
        &self,
        request: &AnalyzeUrlRequest,
    ) -> Result<SubmitResponse, ClientError> {
        self.send_json(
            Method::POST,
            &["api", "analyze-url"],
            Some(request),
            "URL analysis failed.",
        )
        .await
    }

    /// Requests a server-generated demo session (`GET /api/demo`).
    ///
    /// # Errors
    ///
    /// See [`AnalysisClient::analyze`].
    pub async fn demo(&self) -> Result<SubmitResponse, ClientError> {
        self.send_json::<(), _>(Method::GET, &["api", "demo"], None, "Demo failed.")
            .await
    }

    /// Submits a multi-source creator analysis (`POST /api/creator/analyze`).
    ///
    /// # Errors
    ///
    /// See [`AnalysisClient::analyze`].
    pub async fn analyze_creator(
        &self,
        request: &CreatorAnalyzeRequest,
    ) -> Result<SubmitResponse, ClientError> {
        self.send_json(
            Method::POST,
            &["api", "creator", "analyze"],
            Some(request),
            "Creator analysis failed.",
        )
        .await
    }

    /// Fetches a single-source session (`GET /api/session/:id`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with status 404 if the session does not exist
    ///   (see [`ClientError::is_not_found`]).
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the session is not a single-source one.
    pub async fn get_single_session(&self, session_id: &str) -> Result<SingleSession, ClientError> {
        self.send_json::<(), _>(
            Method::GET,
            &["api", "session", session_id],
            None,
            "Session not found.",
        )
        .await
    }

    /// Fetches a creator session (`GET /api/session/:id`) and unwraps its
    /// `data` envelope.
    ///
    /// # Errors
    ///
    /// See [`AnalysisClient::get_single_session`].
    pub async fn get_creator_session(
        &self,
        session_id: &str,
    ) -> Result<CreatorReport, ClientError> {
        let session: CreatorSession = self
            .send_json::<(), _>(
                Method::GET,
                &["api", "session", session_id],
                None,
                "Session not found.",
            )
            .await?;
        Ok(session.data)
    }

    /// Builds an endpoint URL from path segments. Each segment is
    /// percent-encoded, so an opaque session id can never alter the path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request, maps non-2xx statuses to [`ClientError::Api`], and
    /// parses the success body as `T`.
    async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        fallback: &str,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        tracing::debug!(%method, %url, "sending request to analysis service");

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("{fallback} (HTTP {})", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %url, error = %message, "analysis service rejected request");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
