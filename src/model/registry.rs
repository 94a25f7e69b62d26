//! Process-wide model registry: the three scorers plus the feature scaler,
//! loaded once and read-only thereafter.

use super::{
    normalize_isolation_decision, GradientBoostedModel, IsolationForestModel, ModelKind,
    ModelLoadError, OutlierLabel, ScorerOutput, ScoringError, SequenceConvModel, StandardScaler,
};
use crate::config::ModelPaths;
use crate::features::{FEATURE_DIM, FEATURE_NAMES};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::info;

pub struct ModelRegistry {
    scaler: StandardScaler,
    boosted: GradientBoostedModel,
    conv: SequenceConvModel,
    forest: IsolationForestModel,
}

impl ModelRegistry {
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelLoadError> {
        let scaler = StandardScaler::load(&paths.scaler)?;
        let boosted = GradientBoostedModel::load(&paths.boosted_tree)?;
        let conv = SequenceConvModel::load(&paths.sequence_conv)?;
        let forest = IsolationForestModel::load(&paths.isolation_forest)?;
        info!("model registry loaded");
        Ok(Self {
            scaler,
            boosted,
            conv,
            forest,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Run one scorer variant over a scaled feature vector and normalize
    /// its native output into the shared [`ScorerOutput`] shape.
    pub fn score(&self, kind: ModelKind, scaled: &[f64; FEATURE_DIM]) -> Result<ScorerOutput, ScoringError> {
        for (name, value) in FEATURE_NAMES.into_iter().zip(scaled.iter()) {
            if !value.is_finite() {
                return Err(ScoringError::BadInput { name });
            }
        }

        let output = match kind {
            ModelKind::BoostedTree => {
                let p = self.boosted.predict_proba(scaled);
                ScorerOutput {
                    is_anomaly: p > 0.5,
                    normalized_score: p,
                }
            }
            ModelKind::SequenceConv => {
                let p = self.conv.predict_proba(scaled);
                ScorerOutput {
                    is_anomaly: p > 0.5,
                    normalized_score: p,
                }
            }
            ModelKind::OutlierIsolation => {
                let decision = self.forest.decision_function(scaled);
                ScorerOutput {
                    is_anomaly: self.forest.predict(scaled) == OutlierLabel::Outlier,
                    normalized_score: normalize_isolation_decision(decision),
                }
            }
        };

        if !output.normalized_score.is_finite() {
            return Err(ScoringError::NonFinite { model: kind.label() });
        }
        Ok(ScorerOutput {
            normalized_score: output.normalized_score.clamp(0.0, 1.0),
            ..output
        })
    }
}

/// Registry lifecycle as observed by callers. Failed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryState {
    Uninitialized,
    Ready,
    Failed,
}

type Loader = Box<dyn Fn() -> Result<ModelRegistry, ModelLoadError> + Send + Sync>;

/// Single-initialization holder. Under concurrent first access the loader
/// runs exactly once while other callers wait; a failed load is cached and
/// returned to every caller until the process is restarted. Reads after
/// initialization take no lock.
pub struct LazyRegistry {
    cell: OnceLock<Result<ModelRegistry, ModelLoadError>>,
    loader: Loader,
}

impl LazyRegistry {
    pub fn new(paths: ModelPaths) -> Self {
        Self::with_loader(move || ModelRegistry::load(&paths))
    }

    /// Custom loader; lets tests count or fail initialization.
    pub fn with_loader(
        loader: impl Fn() -> Result<ModelRegistry, ModelLoadError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            cell: OnceLock::new(),
            loader: Box::new(loader),
        }
    }

    pub fn get(&self) -> Result<&ModelRegistry, ModelLoadError> {
        match self.cell.get_or_init(|| (self.loader)()) {
            Ok(registry) => Ok(registry),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn state(&self) -> RegistryState {
        match self.cell.get() {
            None => RegistryState::Uninitialized,
            Some(Ok(_)) => RegistryState::Ready,
            Some(Err(_)) => RegistryState::Failed,
        }
    }
}
