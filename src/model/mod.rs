//! Pre-trained model artifacts and the polymorphic anomaly scorer.
//!
//! Three scorer variants sit behind one closed [`ModelKind`] enum: a
//! gradient-boosted classifier, a 1-D convolutional classifier, and an
//! unsupervised isolation forest. All of them consume the same scaled
//! eight-field feature vector and are normalized into [`ScorerOutput`].
//! Parameters come from JSON artifacts produced by the offline training
//! pipeline; inference is a pure function of (vector, parameters).

mod conv;
mod forest;
mod gbdt;
mod registry;
mod scaler;

pub use conv::SequenceConvModel;
pub use forest::{normalize_isolation_decision, IsolationForestModel, OutlierLabel};
pub use gbdt::GradientBoostedModel;
pub use registry::{LazyRegistry, ModelRegistry, RegistryState};
pub use scaler::StandardScaler;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of scorer variants. Dispatch is an exhaustive match; adding
/// a variant is a compile error until every caller handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    BoostedTree,
    SequenceConv,
    OutlierIsolation,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::BoostedTree,
        ModelKind::SequenceConv,
        ModelKind::OutlierIsolation,
    ];

    /// Display name used in assessment narratives.
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::BoostedTree => "XGBoost",
            ModelKind::SequenceConv => "CNN",
            ModelKind::OutlierIsolation => "Isolation Forest",
        }
    }
}

/// Normalized verdict shared by all scorer variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorerOutput {
    pub is_anomaly: bool,
    /// Anomaly confidence, clamped into [0, 1] whatever the native range.
    pub normalized_score: f64,
}

/// Artifact problems at initialization. Fatal: the registry caches the
/// failure and every caller observes the same error until restart.
#[derive(Debug, Clone, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {detail}")]
    Read { path: String, detail: String },
    #[error("model artifact {path} is not valid JSON: {detail}")]
    Parse { path: String, detail: String },
    #[error("model artifact {path} is structurally invalid: {detail}")]
    Invalid { path: String, detail: String },
}

/// Per-request scoring failure on a loaded model.
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    #[error("scaled feature `{name}` is not finite")]
    BadInput { name: &'static str },
    #[error("{model} model produced a non-finite score")]
    NonFinite { model: &'static str },
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
