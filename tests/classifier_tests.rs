// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end tests for the classification core and HTTP layer

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use roadsign_node::api::build_router;
use roadsign_node::classifier::{parse_predictions, ClassifierError, SIGN_CATALOG};
use roadsign_node::{ClassifierConfig, UnifiedClassifier};

// 8-byte PNG signature; enough for the magic-byte gate, and the classifier
// itself never decodes pixels.
const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn fallback_only_classifier() -> UnifiedClassifier {
    UnifiedClassifier::new(&ClassifierConfig::default()).unwrap()
}

#[tokio::test]
async fn test_no_credential_forces_fallback() {
    let classifier = fallback_only_classifier();
    assert!(!classifier.has_remote());

    for _ in 0..20 {
        let result = classifier.classify(PNG_HEADER, Some("image/png")).await.unwrap();

        assert!(!result.all_classes.is_empty());
        assert!(result.all_classes.len() <= 5);
        for prediction in &result.all_classes {
            assert!(SIGN_CATALOG.contains(&prediction.label.as_str()));
            assert!((0.0..=1.0).contains(&prediction.confidence));
        }
    }
}

#[tokio::test]
async fn test_result_invariants_hold() {
    let classifier = fallback_only_classifier();
    let result = classifier.classify(PNG_HEADER, None).await.unwrap();

    assert_eq!(result.classification, result.all_classes[0].label);
    assert!((result.confidence - result.all_classes[0].confidence).abs() < f64::EPSILON);

    let mut previous = f64::INFINITY;
    for prediction in &result.all_classes {
        assert!(prediction.confidence <= previous);
        previous = prediction.confidence;
    }
}

#[tokio::test]
async fn test_empty_payload_is_the_only_error() {
    let classifier = fallback_only_classifier();
    let result = classifier.classify(b"", None).await;
    assert!(matches!(result, Err(ClassifierError::EmptyInput)));
}

#[tokio::test]
async fn test_remote_failure_never_reaches_caller() {
    let config = ClassifierConfig {
        endpoint: "http://127.0.0.1:59999".to_string(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let classifier = UnifiedClassifier::new(&config).unwrap();
    assert!(classifier.has_remote());

    let result = classifier.classify(PNG_HEADER, Some("image/png")).await.unwrap();
    assert!(!result.all_classes.is_empty());
}

#[tokio::test]
async fn test_history_stub_is_empty() {
    assert!(fallback_only_classifier().history().is_empty());
}

#[test]
fn test_normalizer_clamps_round_trip() {
    let raw = r#"{"predictions":[{"label":"Stop","confidence":1.4},{"label":"Yield","confidence":-0.2}]}"#;
    let predictions = parse_predictions(raw);
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].label, "Stop");
    assert!((predictions[0].confidence - 1.0).abs() < f64::EPSILON);
    assert_eq!(predictions[1].label, "Yield");
    assert!(predictions[1].confidence.abs() < f64::EPSILON);
}

// --- HTTP layer ---

fn multipart_body(filename: &str, content_type: &str, payload: &[u8]) -> (String, Vec<u8>) {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

fn test_router() -> axum::Router {
    build_router(Arc::new(fallback_only_classifier()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_classify_endpoint_returns_predictions() {
    let (content_type, body) = multipart_body("stop.png", "image/png", PNG_HEADER);
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classification/classify")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["classification"].is_string());
    let all_classes = json["all_classes"].as_array().unwrap();
    assert!(!all_classes.is_empty() && all_classes.len() <= 5);
    assert_eq!(json["classification"], all_classes[0]["sign"]);
}

#[tokio::test]
async fn test_classify_endpoint_rejects_bad_extension() {
    let (content_type, body) = multipart_body("sign.webp", "image/png", PNG_HEADER);
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classification/classify")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "validation_error");
}

#[tokio::test]
async fn test_classify_endpoint_rejects_empty_payload() {
    let (content_type, body) = multipart_body("stop.png", "image/png", b"");
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classification/classify")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_endpoint_validates_and_reports() {
    let (content_type, body) = multipart_body("stop.png", "image/png", PNG_HEADER);
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "stop.png");
    assert_eq!(json["mime_type"], "image/png");
    assert_eq!(json["size_bytes"], PNG_HEADER.len());
}

#[tokio::test]
async fn test_results_endpoint_echoes_image_id() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/classification/results/abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["image_id"], "abc-123");
    assert_eq!(json["status"], "completed");
    assert!(json["classification"].is_string());
}

#[tokio::test]
async fn test_history_endpoint_is_empty() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/classification/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["history"], serde_json::json!([]));
}
