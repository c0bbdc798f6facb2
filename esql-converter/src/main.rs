use esql_converter::config::ConverterConfig;
use esql_converter::handlers::health::SERVICE_NAME;
use esql_converter::services::init_metrics;
use esql_converter::startup::Application;
use service_core::observability::init_tracing;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ConverterConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    init_tracing(
        SERVICE_NAME,
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    let app = Application::build_with_shutdown(config, shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Failed to start application: {}", e);
            std::io::Error::other(format!("Startup error: {}", e))
        })?;

    app.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        e
    })
}
