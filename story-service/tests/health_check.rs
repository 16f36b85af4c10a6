//! Integration tests that run the real server on a random port.
//! Run with: cargo test -p story-service --test health_check

mod common;

use common::test_config;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use story_service::services::providers::mock::{ImageOutcome, MockImageProvider, MockTextProvider};
use story_service::startup::Application;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let app = Application::build_with_providers(
        test_config(),
        Arc::new(MockTextProvider::replying(MockTextProvider::story_json(8))),
        Arc::new(MockImageProvider::always(ImageOutcome::Png)),
    )
    .await
    .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "story-service");
}

#[tokio::test]
async fn generate_returns_story_over_http() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/generate", port))
        .json(&serde_json::json!({ "prompt": "a dragon who loves painting" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["title"], "The Painting Dragon");
    assert_eq!(body["parts"].as_array().unwrap().len(), 8);
}
