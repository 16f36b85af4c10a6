use axum::Json;
use serde_json::{json, Value};

/// Liveness message served at `/`.
pub const LIVENESS_MESSAGE: &str = "Story Generator API is running!";

pub async fn root() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// Health check endpoint for Docker/K8s health checks.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "story-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
