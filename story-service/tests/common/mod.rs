//! Test helpers for story-service integration tests.
//!
//! Builds configuration and routers wired to scripted mock providers so the
//! tests never reach the real Gemini API.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use service_core::config::Config;
use std::sync::Arc;
use story_service::config::{
    CorsConfig, GeminiSettings, GenerationConfig, ModelConfig, StoryConfig,
};
use story_service::services::providers::mock::{MockImageProvider, MockTextProvider};
use story_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

pub const PNG_PREFIX: &str = "data:image/png;base64,";
pub const SVG_PREFIX: &str = "data:image/svg+xml;base64,";

pub fn test_config() -> StoryConfig {
    StoryConfig {
        common: Config { port: 0 },
        gemini: GeminiSettings {
            api_key: "test-api-key".to_string(),
            api_base: "http://localhost:1".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.0-flash-preview-image-generation".to_string(),
        },
        generation: GenerationConfig::default(),
        cors: CorsConfig::default(),
        otlp_endpoint: None,
    }
}

pub fn test_router(text: Arc<MockTextProvider>, image: Arc<MockImageProvider>) -> Router {
    build_router(AppState::new(test_config(), text, image))
}

/// Send a `POST /generate` with the given JSON body.
pub async fn post_generate(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
