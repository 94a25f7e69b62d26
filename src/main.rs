//! Orbit Sentry entrypoint: load configuration, initialize logging, warm
//! the model registry, and serve the analysis API.

use orbit_sentry::analyzer::SatelliteAnalyzer;
use orbit_sentry::config::ServiceConfig;
use orbit_sentry::logging::StructuredLogger;
use orbit_sentry::server::{router, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("ORBIT_SENTRY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = ServiceConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(listen = %config.listen_addr, "orbit-sentry starting");

    let analyzer = SatelliteAnalyzer::new(config.models.clone());
    // A load failure is terminal; keep serving so every caller receives
    // the same 503 until the artifacts are remediated.
    if let Err(e) = analyzer.warm() {
        error!(error = %e, "model registry failed to load");
    }

    let state = Arc::new(AppState { analyzer });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("orbit-sentry stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
