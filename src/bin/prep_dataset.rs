//! Dataset preparation: download the TLE catalog, parse it, inject
//! synthetic anomalies, and write JSON lines for the offline trainers.

use orbit_sentry::config::ServiceConfig;
use orbit_sentry::data::{fetch_catalog, inject_synthetic_anomalies, parse_catalog, write_dataset};
use orbit_sentry::logging::StructuredLogger;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("ORBIT_SENTRY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = ServiceConfig::load(&config_path);
    StructuredLogger::init(config.log.json, &config.log.level);

    let raw = fetch_catalog(&config.dataset.source_url)?;
    let catalog = parse_catalog(&raw);
    info!(count = catalog.len(), "catalog parsed");

    let labeled = inject_synthetic_anomalies(
        catalog,
        config.dataset.anomaly_fraction,
        &mut rand::thread_rng(),
    );
    let anomalies = labeled.iter().filter(|s| s.anomaly_label).count();

    write_dataset(&labeled, &config.dataset.output_path)?;

    info!(
        total = labeled.len(),
        anomalies,
        path = %config.dataset.output_path.display(),
        "dataset written"
    );
    Ok(())
}
