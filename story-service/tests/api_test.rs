//! Router-level tests for the story endpoints using mock providers.
//! Run with: cargo test -p story-service --test api_test

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{post_generate, test_router, PNG_PREFIX, SVG_PREFIX};
use serde_json::json;
use std::sync::Arc;
use story_service::services::providers::mock::{ImageOutcome, MockImageProvider, MockTextProvider};
use story_service::services::providers::ProviderError;
use tower::util::ServiceExt;

fn assert_eight_illustrated_parts(body: &serde_json::Value) {
    let parts = body["parts"].as_array().expect("parts array");
    assert_eq!(parts.len(), 8);
    for part in parts {
        assert!(!part["text"].as_str().unwrap().trim().is_empty());
        let image = part["image"].as_str().unwrap();
        assert!(image.starts_with(PNG_PREFIX) || image.starts_with(SVG_PREFIX));
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = test_router(
        Arc::new(MockTextProvider::replying("")),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Story Generator API is running!");
}

#[tokio::test]
async fn end_to_end_story_with_real_images() {
    let text = Arc::new(MockTextProvider::replying(MockTextProvider::story_json(8)));
    let image = Arc::new(MockImageProvider::always(ImageOutcome::Png));
    let app = test_router(text.clone(), image.clone());

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon who loves painting" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Painting Dragon");
    assert_eight_illustrated_parts(&body);
    assert!(body["parts"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["image"].as_str().unwrap().starts_with(PNG_PREFIX)));
    assert_eq!(text.calls(), 1);
    assert_eq!(image.calls(), 8);
}

#[tokio::test]
async fn always_returns_eight_parts() {
    for upstream_parts in [3, 8, 12] {
        let app = test_router(
            Arc::new(MockTextProvider::replying(MockTextProvider::story_json(upstream_parts))),
            Arc::new(MockImageProvider::always(ImageOutcome::Png)),
        );

        let (status, body) = post_generate(app, json!({ "prompt": "a sleepy owl" })).await;

        assert_eq!(status, StatusCode::OK, "upstream parts: {}", upstream_parts);
        assert_eight_illustrated_parts(&body);
    }
}

#[tokio::test]
async fn blank_prompt_is_rejected_without_backend_calls() {
    for prompt in ["", "   ", "\n\t"] {
        let text = Arc::new(MockTextProvider::replying(MockTextProvider::story_json(8)));
        let image = Arc::new(MockImageProvider::always(ImageOutcome::Png));
        let app = test_router(text.clone(), image.clone());

        let (status, body) = post_generate(app, json!({ "prompt": prompt })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt cannot be empty");
        assert_eq!(text.calls(), 0);
        assert_eq!(image.calls(), 0);
    }
}

#[tokio::test]
async fn quota_exhaustion_falls_back_to_placeholders() {
    let image = Arc::new(MockImageProvider::scripted(
        vec![
            ImageOutcome::Png,
            ImageOutcome::Fail(ProviderError::ApiError(
                "Gemini API error 429 Too Many Requests: RESOURCE_EXHAUSTED".to_string(),
            )),
        ],
        ImageOutcome::Png,
    ));
    let app = test_router(
        Arc::new(MockTextProvider::replying(MockTextProvider::story_json(8))),
        image.clone(),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eight_illustrated_parts(&body);
    assert_eq!(image.calls(), 2);
    let parts = body["parts"].as_array().unwrap();
    assert!(parts[0]["image"].as_str().unwrap().starts_with(PNG_PREFIX));
    assert!(parts[1..]
        .iter()
        .all(|p| p["image"].as_str().unwrap().starts_with(SVG_PREFIX)));
}

#[tokio::test]
async fn malformed_json_still_yields_story() {
    let raw = r#"{"title": "Broken", "parts": [{"part_number": 1, "content": "Once" + oops}"#;
    let app = test_router(
        Arc::new(MockTextProvider::replying(raw)),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "A Magical Adventure");
    assert_eight_illustrated_parts(&body);
}

#[tokio::test]
async fn concatenation_artifacts_are_repaired() {
    let raw = "```json\n{\"title\": \"Paint\" + \"brush\", \"parts\": [{\"part_number\": 1, \"content\": \"A \" + \"dragon\"}]}\n```";
    let app = test_router(
        Arc::new(MockTextProvider::replying(raw)),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Paintbrush");
    assert_eq!(body["parts"][0]["text"], "A dragon");
    assert_eight_illustrated_parts(&body);
}

#[tokio::test]
async fn text_backend_failure_is_a_server_error() {
    let image = Arc::new(MockImageProvider::always(ImageOutcome::Png));
    let app = test_router(
        Arc::new(MockTextProvider::failing(ProviderError::NetworkError(
            "connection refused".to_string(),
        ))),
        image.clone(),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let details = body["details"].as_str().unwrap();
    assert!(details.starts_with("Failed to generate story"));
    assert!(details.contains("connection refused"));
    assert_eq!(image.calls(), 0);
}

#[tokio::test]
async fn wrong_shape_json_is_a_server_error() {
    let app = test_router(
        Arc::new(MockTextProvider::replying(r#"["not", "a", "story"]"#)),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Failed to parse story structure"));
}

#[tokio::test]
async fn story_without_parts_is_a_server_error() {
    let app = test_router(
        Arc::new(MockTextProvider::replying(r#"{"title": "Empty"}"#)),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let (status, body) = post_generate(app, json!({ "prompt": "a dragon" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("No story parts generated"));
}

#[tokio::test]
async fn cors_preflight_allows_local_origin_with_credentials() {
    let app = test_router(
        Arc::new(MockTextProvider::replying("")),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/generate")
                .header("Origin", "http://localhost:5173")
                .header("Access-Control-Request-Method", "POST")
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
}
