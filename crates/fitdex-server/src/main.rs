//! # Fitdex Server
//!
//! Serves the cached exercise catalog over HTTP.
//!
//! Configuration is read from `./config` and `FITDEX_*` environment
//! variables; see `fitdex-config` for the layering rules.

use fitdex_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use fitdex_core::{init_tracing, FitdexError, FitdexResult};
use fitdex_rest::create_router;
use fitdex_server::{di::AppContainer, startup};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("fitdex-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> FitdexResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_tracing(&config.observability.tracing())?;

    startup::print_banner();
    info!("Starting Fitdex server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if config.observability.metrics_enabled {
        install_metrics_exporter(&config.observability)?;
    }

    serve(config).await
}

async fn serve(config: AppConfig) -> FitdexResult<()> {
    let container = AppContainer::build(&config).await?;
    let router = create_router(container.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FitdexError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    startup::print_startup_info(&config);
    info!("Listening on http://{}", addr);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FitdexError::Internal(format!("HTTP server error: {}", e)));

    container.shutdown().await;
    info!("Server shutdown complete");
    result
}

fn install_metrics_exporter(config: &ObservabilityConfig) -> FitdexResult<()> {
    let addr: SocketAddr = config.metrics_addr.parse().map_err(|e| {
        FitdexError::Configuration(format!("Invalid metrics_addr {}: {}", config.metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| FitdexError::Internal(format!("Failed to install metrics exporter: {}", e)))?;

    fitdex_service::metrics::register_metrics();
    info!("Prometheus metrics exporter listening on {}", addr);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
