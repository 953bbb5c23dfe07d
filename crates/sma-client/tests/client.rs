//! Integration tests for `AnalysisClient` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sma_client::{AnalysisClient, ClientError};
use sma_core::{text_request, url_request, CreatorForm, ManualPlatform};

fn test_client(base_url: &str) -> AnalysisClient {
    AnalysisClient::new(base_url, 5, "sma-test/0.1").expect("client construction should not fail")
}

#[tokio::test]
async fn analyze_posts_comments_and_title() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({"comments": ["love it", "hate it"], "title": "Untitled Analysis"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "sess-1",
            "title": "Untitled Analysis",
            "results": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = text_request("love it\n\nhate it\n", "").unwrap();
    let response = client.analyze(&request).await.expect("should submit");

    assert_eq!(response.session_id, "sess-1");
    assert_eq!(response.title.as_deref(), Some("Untitled Analysis"));
}

#[tokio::test]
async fn analyze_url_surfaces_service_error_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze-url"))
        .and(body_json(json!({"url": "https://example.com/post"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Unsupported platform. Currently supporting Reddit, YouTube, and Instagram."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = url_request("https://example.com/post").unwrap();
    let err = client.analyze_url(&request).await.unwrap_err();

    assert!(
        matches!(err, ClientError::Api { status: 400, .. }),
        "expected Api(400), got: {err:?}"
    );
    assert_eq!(
        err.to_string(),
        "Unsupported platform. Currently supporting Reddit, YouTube, and Instagram."
    );
}

#[tokio::test]
async fn error_without_json_body_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/demo"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.demo().await.unwrap_err();

    assert_eq!(err.to_string(), "Demo failed. (HTTP 502)");
}

#[tokio::test]
async fn demo_returns_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "demo-42",
            "title": "Demo Analysis"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.demo().await.expect("demo should succeed");
    assert_eq!(response.session_id, "demo-42");
}

#[tokio::test]
async fn analyze_creator_posts_combined_sources() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/creator/analyze"))
        .and(body_json(json!({
            "name": "@chef",
            "urls": ["https://youtube.com/watch?v=1"],
            "manual_data": [
                {"platform": "instagram", "text": "so good\nmeh", "title": "Manual Entry"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "creator-7",
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = CreatorForm::new("@chef");
    form.add_url_row("https://youtube.com/watch?v=1");
    form.add_manual_row(ManualPlatform::Instagram, "so good\nmeh");

    let client = test_client(&server.uri());
    let response = client
        .analyze_creator(&form.submission().unwrap())
        .await
        .expect("creator analysis should succeed");

    assert_eq!(response.session_id, "creator-7");
    assert_eq!(response.status.as_deref(), Some("success"));
}

#[tokio::test]
async fn success_without_session_id_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.demo().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn get_single_session_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Launch",
            "timestamp": "2025-03-01T10:15:00.000001",
            "results": {
                "positive": ["great"],
                "negative": [],
                "neutral": ["fine"],
                "counts": {"positive": 1, "negative": 0, "neutral": 1, "total": 2},
                "brand_score": 100.0,
                "brand_recommendation": "Excellent for Brand Collaboration!"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let session = client
        .get_single_session("sess-1")
        .await
        .expect("should parse session");

    assert_eq!(session.title, "Launch");
    assert_eq!(session.results.counts.total, 2);
    assert_eq!(session.results.comments.neutral, vec!["fine"]);
    assert_eq!(session.results.brand_score, Some(100.0));
}

#[tokio::test]
async fn get_creator_session_unwraps_data_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/creator-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "creator",
            "data": {
                "creator_name": "@chef",
                "timestamp": "2025-03-01T10:15:00",
                "business_analysis": {
                    "overall_score": 75.0,
                    "positive_percentage": 50.0,
                    "recommendation_title": "Good Choice",
                    "recommendation_detail": "Safe for most campaigns.",
                    "category": "good",
                    "cult_following_indicator": "Medium"
                },
                "stats": {
                    "positive": ["a", "b"],
                    "negative": ["c"],
                    "neutral": ["d"],
                    "total_count": 4,
                    "platform_breakdown": {
                        "youtube": {"positive": 2, "negative": 1, "neutral": 1, "total": 4},
                        "reddit": {"positive": 0, "negative": 0, "neutral": 0, "total": 0},
                        "other": {"positive": 0, "negative": 0, "neutral": 0, "total": 0}
                    },
                    "sources": [{
                        "url": "https://youtube.com/watch?v=1",
                        "title": "Cooking 101",
                        "platform": "youtube",
                        "sentiment_summary": {"positive": 2, "negative": 1, "neutral": 1, "total": 4}
                    }]
                },
                "errors": []
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = client
        .get_creator_session("creator-7")
        .await
        .expect("should parse creator session");

    assert_eq!(report.creator_name, "@chef");
    assert_eq!(report.business_analysis.category, "good");
    assert_eq!(report.stats.total_count, 4);
    assert_eq!(report.stats.platform_breakdown.youtube.total, 4);
    assert_eq!(report.stats.sources[0].title, "Cooking 101");
}

#[tokio::test]
async fn missing_session_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_single_session("gone").await.unwrap_err();

    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    assert_eq!(err.to_string(), "Session not found");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = test_client(&format!("http://127.0.0.1:{port}"));
    let err = client.demo().await.unwrap_err();

    assert!(
        matches!(err, ClientError::Http(_)),
        "expected Http, got: {err:?}"
    );
    assert!(err.to_string().starts_with("Network Error: "));
}
