//! Service configuration: transport, model artifact paths, logging, and
//! dataset preparation settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listen address
    pub listen_addr: String,
    /// Pre-trained artifact locations
    pub models: ModelPaths,
    /// Logging
    pub log: LogConfig,
    /// Dataset preparation (prep-dataset binary)
    pub dataset: DatasetConfig,
}

/// On-disk locations of the scaler and the three model artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPaths {
    pub scaler: PathBuf,
    pub boosted_tree: PathBuf,
    pub sequence_conv: PathBuf,
    pub isolation_forest: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// TLE catalog source
    pub source_url: String,
    /// Labeled output path (JSON lines)
    pub output_path: PathBuf,
    /// Fraction of records perturbed into synthetic anomalies
    pub anomaly_fraction: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5001".to_string(),
            models: ModelPaths::default(),
            log: LogConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            scaler: PathBuf::from("models/scaler.json"),
            boosted_tree: PathBuf::from("models/boosted_tree.json"),
            sequence_conv: PathBuf::from("models/sequence_conv.json"),
            isolation_forest: PathBuf::from("models/isolation_forest.json"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source_url: crate::data::CELESTRAK_ACTIVE_URL.to_string(),
            output_path: PathBuf::from("satellite_dataset.ndjson"),
            anomaly_fraction: 0.05,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<ServiceConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
