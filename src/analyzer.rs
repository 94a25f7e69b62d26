//! Request orchestrator: one atomic TLE pair → risk assessment call.

use crate::config::ModelPaths;
use crate::features::{self, TleError};
use crate::model::{LazyRegistry, ModelLoadError, RegistryState, ScoringError};
use crate::risk::{RiskAssessment, RiskEngine};
use crate::select::{DrawSource, ModelSelector, SystemDraw};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to parse TLE data.")]
    Tle(#[from] TleError),
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

pub struct SatelliteAnalyzer {
    registry: LazyRegistry,
    selector: ModelSelector,
    risk: RiskEngine,
}

impl SatelliteAnalyzer {
    /// Production wiring: artifact paths plus thread-RNG draws.
    pub fn new(paths: ModelPaths) -> Self {
        Self::with_parts(LazyRegistry::new(paths), Arc::new(SystemDraw))
    }

    /// Explicit wiring: injected registry loader and draw source.
    pub fn with_parts(registry: LazyRegistry, draw: Arc<dyn DrawSource>) -> Self {
        Self {
            registry,
            selector: ModelSelector::new(Arc::clone(&draw)),
            risk: RiskEngine::new(draw),
        }
    }

    /// Force registry initialization ahead of the first request.
    pub fn warm(&self) -> Result<(), ModelLoadError> {
        self.registry.get().map(|_| ())
    }

    pub fn registry_state(&self) -> RegistryState {
        self.registry.state()
    }

    /// Full pipeline: registry → extract → scale → select → score →
    /// synthesize. Atomic from the caller's perspective; no partial
    /// results are ever returned.
    pub fn analyze(&self, line1: &str, line2: &str) -> Result<RiskAssessment, AnalysisError> {
        let registry = self.registry.get()?;
        let features = features::extract(line1, line2)?;
        let scaled = registry.scaler().transform(&features);
        let kind = self.selector.select();
        let output = registry.score(kind, &scaled)?;
        let assessment = self.risk.assess(&output, kind);
        info!(
            model = kind.label(),
            score = output.normalized_score,
            level = ?assessment.risk_level,
            "assessment produced"
        );
        Ok(assessment)
    }
}
