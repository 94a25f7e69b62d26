//! Risk synthesis: severity tiers, narratives, and taxonomy mappings.

mod catalog;
mod engine;

pub use catalog::{AnomalyCause, ANOMALY_CAUSES};
pub use engine::{RiskAssessment, RiskEngine, RiskLevel};
