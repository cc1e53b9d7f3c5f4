//! Server startup utilities.

use fitdex_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    _______ __      __
   / ____(_) /_____/ /__  _  __
  / /_  / / __/ __  / _ \| |/_/
 / __/ / / /_/ /_/ /  __/>  <
/_/   /_/\__/\__,_/\___/_/|_|
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!(
        "Source:    {} (table {})",
        config.source.kind, config.source.table
    );
    info!(
        "Cache:     ttl={}s validity={} coalesce={}",
        config.cache.ttl_secs, config.cache.validity, config.cache.coalesce_requests
    );
    info!("Facets:    {}", config.facets.mode);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}/metrics", config.observability.metrics_addr);
    }
    info!("{}", separator);
}
