//! Application startup and lifecycle management.

use crate::config::StoryConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiImageProvider, GeminiTextProvider};
use crate::services::providers::{ImageProvider, TextProvider};
use crate::services::{Illustrator, StoryAssembler};
use axum::{
    http::{HeaderValue, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: StoryConfig,
    pub assembler: StoryAssembler,
    pub illustrator: Illustrator,
}

impl AppState {
    pub fn new(
        config: StoryConfig,
        text_provider: Arc<dyn TextProvider>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Self {
        let assembler = StoryAssembler::new(text_provider, &config.generation);
        let illustrator = Illustrator::new(image_provider, &config.generation);

        Self {
            config,
            assembler,
            illustrator,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    // Wildcards are rejected alongside credentials, so methods and headers
    // are mirrored from the preflight request instead.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the HTTP router with CORS, request ids and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate_story))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with Gemini text and image providers.
    pub async fn build(config: StoryConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> = Arc::new(
            GeminiTextProvider::new(
                GeminiConfig::new(&config.gemini.api_key, &config.models.text_model)
                    .with_api_base(&config.gemini.api_base),
            )
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
        );

        let image_provider: Arc<dyn ImageProvider> = Arc::new(
            GeminiImageProvider::new(
                GeminiConfig::new(&config.gemini.api_key, &config.models.image_model)
                    .with_api_base(&config.gemini.api_base),
            )
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
        );

        tracing::info!(
            text_model = %config.models.text_model,
            image_model = %config.models.image_model,
            "Initialized Gemini providers"
        );

        Self::build_with_providers(config, text_provider, image_provider).await
    }

    /// Build the application with the given providers (used by tests).
    pub async fn build_with_providers(
        config: StoryConfig,
        text_provider: Arc<dyn TextProvider>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Story service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, text_provider, image_provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
