#![allow(clippy::unwrap_used)]
// Integration tests for `FaceClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helloface_api::types::{EnrollRequest, RecognizeRequest};
use helloface_api::{Error, FaceClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FaceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = FaceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

const IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQ";

// ── Enrollment ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_enroll_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/enroll"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "image": IMAGE,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 1,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "enrolled_at": "2024-06-15T10:30:00.000001",
            "message": "User Ada Lovelace enrolled successfully!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .enroll(&EnrollRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            image: IMAGE.into(),
        })
        .await
        .unwrap();

    assert_eq!(resp.message, "User Ada Lovelace enrolled successfully!");
    assert_eq!(resp.user_id, Some(1));
    assert!(resp.enrolled_at.is_some());
}

#[tokio::test]
async fn test_enroll_rejected_uses_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/enroll"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Multiple faces detected. Please ensure only one face is in the image."
        })))
        .mount(&server)
        .await;

    let result = client
        .enroll(&EnrollRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            image: IMAGE.into(),
        })
        .await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 400);
            assert!(message.starts_with("Multiple faces detected"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_enroll_without_detail_falls_back() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/enroll"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = client
        .enroll(&EnrollRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            image: IMAGE.into(),
        })
        .await;

    match result {
        Err(Error::Api { status: 500, ref message }) => assert_eq!(message, "Enrollment failed"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Recognition ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_recognize_match() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/recognize"))
        .and(body_json(json!({ "image": IMAGE })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recognized": true,
            "message": "Recognized: Ada Lovelace",
            "match": {
                "user_id": 1,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "confidence": 0.83,
                "bounding_box": { "x": 10, "y": 20, "width": 100, "height": 120 }
            }
        })))
        .mount(&server)
        .await;

    let resp = client
        .recognize(&RecognizeRequest {
            image: IMAGE.into(),
        })
        .await
        .unwrap();

    assert!(resp.recognized);
    let m = resp.face_match.unwrap();
    assert_eq!(m.user_id, 1);
    assert!((m.confidence - 0.83).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_recognize_no_match() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/recognize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recognized": false,
            "match": null,
            "message": "no match"
        })))
        .mount(&server)
        .await;

    let resp = client
        .recognize(&RecognizeRequest {
            image: IMAGE.into(),
        })
        .await
        .unwrap();

    assert!(!resp.recognized);
    assert_eq!(resp.message, "no match");
    assert!(resp.face_match.is_none());
}

#[tokio::test]
async fn test_recognize_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/recognize"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let result = client
        .recognize(&RecognizeRequest {
            image: IMAGE.into(),
        })
        .await;

    match result {
        Err(ref e @ Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("proxy error"));
            assert!(e.is_transport());
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_preview_respects_char_boundaries() {
    let (server, client) = setup().await;

    // The 200th byte falls inside the two-byte 'é'.
    let text = format!("{}é trailing", "a".repeat(199));
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(text.clone()))
        .mount(&server)
        .await;

    match client.stats().await {
        Err(ref e @ Error::Deserialization { ref body, ref message }) => {
            assert_eq!(body, &text);
            assert!(message.contains('é'));
            assert!(!message.contains("trailing"));
            assert!(e.is_transport());
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_users_preserves_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                { "user_id": 2, "name": "Grace Hopper", "email": "grace@example.com", "enrolled_at": "2024-06-16T09:00:00" },
                { "user_id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "enrolled_at": "2024-06-15T10:30:00Z" }
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let resp = client.list_users().await.unwrap();

    let ids: Vec<i64> = resp.users.iter().map(|u| u.user_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(resp.total, Some(2));
}

#[tokio::test]
async fn test_list_users_failure_uses_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list_users().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.message(), "Failed to fetch users");
}

#[tokio::test]
async fn test_delete_user() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User Ada deleted successfully",
            "user_id": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.delete_user(7).await.unwrap();
    assert_eq!(resp.message, "User Ada deleted successfully");
    assert_eq!(resp.user_id, Some(7));
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "User with ID 99 not found"
        })))
        .mount(&server)
        .await;

    let err = client.delete_user(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "User with ID 99 not found");
}

// ── System ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_and_health() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 3,
            "total_embeddings": 3,
            "recognition_threshold": 0.55,
            "embedding_dimension": 512
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "models_loaded": true,
            "database_connected": true,
            "vector_store_ready": true
        })))
        .mount(&server)
        .await;

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.embedding_dimension, Some(512));

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.models_loaded, Some(true));
}

#[tokio::test]
async fn test_service_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "HelloFace API - 100% Free Face Recognition",
            "version": "1.0.0",
            "docs": "/docs"
        })))
        .mount(&server)
        .await;

    let info = client.service_info().await.unwrap();
    assert_eq!(info.version.as_deref(), Some("1.0.0"));
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = TransportConfig::default().with_api_token("s3cret".to_string().into());
    let client = FaceClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let client = FaceClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
    );

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transport());
}
