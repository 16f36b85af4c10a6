use service_core::observability::init_tracing;
use story_service::config::StoryConfig;
use story_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Config first: it loads .env, which may carry OTLP_ENDPOINT and RUST_LOG.
    let config = StoryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing("story-service", "info", config.otlp_endpoint.as_deref());

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
