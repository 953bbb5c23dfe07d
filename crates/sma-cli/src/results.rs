//! Results controller: loads the stored session and renders or exports it.
//!
//! Failure policy is the same for single and creator sessions: the error is
//! reported, nothing is rendered, and a session the service no longer knows
//! is dropped from the store so the next `show` goes back to the input hint.

use std::path::{Path, PathBuf};

use anyhow::Context;

use sma_client::AnalysisClient;
use sma_core::{
    export_csv, export_file_name, ReportView, Sentiment, SessionKind, SessionStore, StoreError,
};

use crate::indicator::LoadingIndicator;
use crate::render::{self, OutputFormat};

/// Shown whenever there is nothing to display and the user has to start a
/// new analysis.
pub(crate) const START_HINT: &str = "No analysis session found. Start one with \
`sma analyze text|url|csv`, `sma demo`, or `sma creator`.";

/// Fetch and build the report for the stored session.
///
/// Returns `Ok(None)` without touching the network when no session id is
/// stored.
///
/// # Errors
///
/// Returns an error if the fetch fails or the store cannot be updated after
/// a missing-session response.
pub(crate) async fn load_report(
    client: &AnalysisClient,
    store: &mut SessionStore,
) -> anyhow::Result<Option<ReportView>> {
    let Some(session_id) = store.session_id().map(str::to_owned) else {
        tracing::info!("no stored session id");
        return Ok(None);
    };
    let kind = store.session_kind();

    let result = {
        let _loading = LoadingIndicator::show("Loading report...");
        match kind {
            SessionKind::Creator => client
                .get_creator_session(&session_id)
                .await
                .map(ReportView::from_creator),
            SessionKind::Single => client
                .get_single_session(&session_id)
                .await
                .map(ReportView::from_single),
        }
    };

    match result {
        Ok(view) => {
            tracing::debug!(%session_id, %kind, total = view.counts.total, "session loaded");
            Ok(Some(view))
        }
        Err(err) => {
            tracing::error!(%session_id, %kind, error = %err, "failed to load session");
            if err.is_not_found() {
                store.clear_session()?;
                anyhow::bail!("{err}. {START_HINT}");
            }
            Err(anyhow::Error::new(err).context("Error loading report"))
        }
    }
}

pub(crate) async fn run_show(
    client: &AnalysisClient,
    store: &mut SessionStore,
    filter: Sentiment,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let Some(view) = load_report(client, store).await? else {
        println!("{START_HINT}");
        return Ok(());
    };
    println!("{}", render::render(&view, filter, format));
    Ok(())
}

/// Write the CSV export to `out`, or to the sanitized title under `export_dir`.
pub(crate) async fn run_export(
    client: &AnalysisClient,
    store: &mut SessionStore,
    out: Option<PathBuf>,
    export_dir: &Path,
) -> anyhow::Result<()> {
    let Some(view) = load_report(client, store).await? else {
        println!("{START_HINT}");
        return Ok(());
    };

    let path = out.unwrap_or_else(|| export_dir.join(export_file_name(&view.title)));
    write_export(&view, &path)?;
    println!("Exported {} comments to {}", view.counts.total, path.display());
    Ok(())
}

fn write_export(view: &ReportView, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, export_csv(view))
        .with_context(|| format!("failed to write export {}", path.display()))?;
    tracing::info!(path = %path.display(), "export written");
    Ok(())
}

/// Forget the stored session. A state file that no longer parses is
/// replaced rather than reported, so `new` always gets the user unstuck.
pub(crate) fn run_new(state_path: &Path) -> anyhow::Result<()> {
    let mut store = match SessionStore::open(state_path) {
        Ok(store) => store,
        Err(err @ StoreError::Parse { .. }) => {
            tracing::warn!(error = %err, "discarding unreadable session store");
            SessionStore::empty(state_path)
        }
        Err(err) => return Err(err.into()),
    };
    store.clear_session()?;
    println!("Session cleared. {START_HINT}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use sma_core::ReportDetail;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sma-cli-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    fn test_client(base_url: &str) -> AnalysisClient {
        AnalysisClient::new(base_url, 5, "sma-test/0.1").unwrap()
    }

    fn single_body() -> serde_json::Value {
        json!({
            "title": "Launch \"day\"",
            "timestamp": "2025-03-01T10:15:00",
            "results": {
                "positive": ["great", "say \"hi\""],
                "negative": ["bad"],
                "neutral": [],
                "counts": {"positive": 2, "negative": 1, "neutral": 0, "total": 3}
            }
        })
    }

    #[tokio::test]
    async fn no_stored_session_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut store = SessionStore::open(&temp_path("session.json")).unwrap();
        let view = load_report(&test_client(&server.uri()), &mut store)
            .await
            .unwrap();

        assert!(view.is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn creator_marker_selects_creator_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session/c-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "creator",
                "data": {
                    "creator_name": "@chef",
                    "timestamp": "2025-03-01T10:15:00",
                    "business_analysis": {"category": "excellent", "overall_score": 100.0},
                    "stats": {"positive": ["a"], "negative": [], "neutral": [], "total_count": 1}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut store = SessionStore::open(&temp_path("session.json")).unwrap();
        store.record_session("c-1", SessionKind::Creator).unwrap();

        let view = load_report(&test_client(&server.uri()), &mut store)
            .await
            .unwrap()
            .expect("expected a report");

        assert_eq!(view.kind, SessionKind::Creator);
        assert!(matches!(view.detail, ReportDetail::Creator(_)));
        assert_eq!(view.counts.positive, 1);
    }

    #[tokio::test]
    async fn missing_session_clears_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session/gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
            )
            .mount(&server)
            .await;

        let state = temp_path("session.json");
        let mut store = SessionStore::open(&state).unwrap();
        store.record_session("gone", SessionKind::Single).unwrap();

        let err = load_report(&test_client(&server.uri()), &mut store)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Session not found. "));
        assert!(SessionStore::open(&state).unwrap().session_id().is_none());
    }

    #[tokio::test]
    async fn server_error_keeps_session_for_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session/s-1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let state = temp_path("session.json");
        let mut store = SessionStore::open(&state).unwrap();
        store.record_session("s-1", SessionKind::Single).unwrap();

        let err = load_report(&test_client(&server.uri()), &mut store)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error loading report");
        assert_eq!(format!("{err:#}"), "Error loading report: boom");
        assert_eq!(
            SessionStore::open(&state).unwrap().session_id(),
            Some("s-1")
        );
    }

    #[tokio::test]
    async fn export_writes_csv_named_after_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session/s-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(single_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut store = SessionStore::open(&temp_path("session.json")).unwrap();
        store.record_session("s-1", SessionKind::Single).unwrap();
        let export_dir = temp_path("exports");

        run_export(&test_client(&server.uri()), &mut store, None, &export_dir)
            .await
            .unwrap();

        let written =
            std::fs::read_to_string(export_dir.join("Launch__day__analysis.csv")).unwrap();
        assert!(written.starts_with("Sentiment,Count\nPositive,2\n"));
        assert!(written.contains("positive,\"say \"\"hi\"\"\"\n"));
    }

    #[test]
    fn new_clears_stored_session() {
        let state = temp_path("session.json");
        let mut store = SessionStore::open(&state).unwrap();
        store.record_session("s-1", SessionKind::Creator).unwrap();

        run_new(&state).unwrap();

        let reopened = SessionStore::open(&state).unwrap();
        assert!(reopened.session_id().is_none());
        assert_eq!(reopened.session_kind(), SessionKind::Single);
    }

    #[test]
    fn new_recovers_from_corrupt_store() {
        let state = temp_path("session.json");
        std::fs::create_dir_all(state.parent().unwrap()).unwrap();
        std::fs::write(&state, "{not json").unwrap();
        assert!(SessionStore::open(&state).is_err());

        run_new(&state).unwrap();

        let reopened = SessionStore::open(&state).unwrap();
        assert!(reopened.session_id().is_none());
    }
}
