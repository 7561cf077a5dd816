use hello_service::config::Settings;
use hello_service::observability::init_tracing;
use hello_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("info");

    let settings = Settings::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(settings).await.map_err(|e| {
        tracing::error!("Failed to start: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    app.run_until_stopped().await
}
