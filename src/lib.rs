//! Orbit Sentry — satellite TLE anomaly detection service.
//!
//! Modular structure:
//! - [`features`] — Fixed-column TLE decoding into the orbital feature vector
//! - [`model`] — Pre-trained scorer artifacts, registry, and inference
//! - [`select`] — Per-request scorer variant selection
//! - [`risk`] — Severity tiers, narratives, and taxonomy mappings
//! - [`analyzer`] — Request orchestration
//! - [`server`] — HTTP transport
//! - [`data`] — Catalog acquisition and dataset preparation
//! - [`logging`] — Structured JSON logging

pub mod analyzer;
pub mod config;
pub mod data;
pub mod features;
pub mod logging;
pub mod model;
pub mod risk;
pub mod select;
pub mod server;

pub use analyzer::{AnalysisError, SatelliteAnalyzer};
pub use config::ServiceConfig;
pub use features::{extract, FeatureVector};
pub use logging::StructuredLogger;
pub use model::{LazyRegistry, ModelKind, ModelRegistry, ScorerOutput};
pub use risk::{RiskAssessment, RiskEngine, RiskLevel};
pub use select::ModelSelector;
