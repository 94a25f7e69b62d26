//! Isolation forest outlier scorer: average isolation depth over trees,
//! mapped through the standard `2^(-E[h]/c(n))` anomaly measure.

use super::ModelLoadError;
use crate::features::FEATURE_DIM;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Euler-Mascheroni constant, used by the average path length correction.
const EULER_GAMMA: f64 = 0.5772156649015329;
/// Decision offset for auto contamination.
const DECISION_OFFSET: f64 = 0.5;
/// Calibration of the decision-to-confidence rescaling. These constants
/// are part of the output parity contract; do not re-derive them.
const DECISION_SHIFT: f64 = 0.15;
const DECISION_RANGE: f64 = 0.2;

/// Linear rescaling of the decision value into [0, 1] anomaly confidence:
/// values near -0.15 map near full confidence, values above +0.05 to zero.
pub fn normalize_isolation_decision(decision: f64) -> f64 {
    1.0 - ((decision + DECISION_SHIFT) / DECISION_RANGE).clamp(0.0, 1.0)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IsoNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Training samples that ended in this leaf.
        size: usize,
    },
}

#[derive(Debug, Deserialize)]
struct ForestArtifact {
    max_samples: usize,
    trees: Vec<Vec<IsoNode>>,
}

/// Discrete verdict attached to the decision value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierLabel {
    Inlier,
    Outlier,
}

pub struct IsolationForestModel {
    max_samples: usize,
    trees: Vec<Vec<IsoNode>>,
}

impl IsolationForestModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let origin = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
            path: origin.clone(),
            detail: e.to_string(),
        })?;
        Self::from_json(&data, &origin)
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ModelLoadError> {
        let artifact: ForestArtifact = serde_json::from_str(json).map_err(|e| ModelLoadError::Parse {
            path: origin.to_string(),
            detail: e.to_string(),
        })?;
        let invalid = |detail: String| ModelLoadError::Invalid {
            path: origin.to_string(),
            detail,
        };

        if artifact.max_samples < 2 {
            return Err(invalid(format!("max_samples {} below 2", artifact.max_samples)));
        }
        if artifact.trees.is_empty() {
            return Err(invalid("forest has no trees".to_string()));
        }
        for (t, tree) in artifact.trees.iter().enumerate() {
            if tree.is_empty() {
                return Err(invalid(format!("tree {t} is empty")));
            }
            for (i, node) in tree.iter().enumerate() {
                if let IsoNode::Split { feature, threshold, left, right } = node {
                    if *feature >= FEATURE_DIM {
                        return Err(invalid(format!("tree {t} node {i}: feature {feature} out of range")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("tree {t} node {i}: non-finite threshold")));
                    }
                    if *left >= tree.len() || *right >= tree.len() || *left <= i || *right <= i {
                        return Err(invalid(format!("tree {t} node {i}: invalid child indices")));
                    }
                }
            }
        }

        Ok(Self {
            max_samples: artifact.max_samples,
            trees: artifact.trees,
        })
    }

    /// Signed decision value; more negative is more anomalous.
    pub fn decision_function(&self, features: &[f64; FEATURE_DIM]) -> f64 {
        let mean_depth = self
            .trees
            .iter()
            .map(|tree| path_length(tree, features))
            .sum::<f64>()
            / self.trees.len() as f64;
        let measure = 2f64.powf(-mean_depth / average_path_length(self.max_samples));
        DECISION_OFFSET - measure
    }

    pub fn predict(&self, features: &[f64; FEATURE_DIM]) -> OutlierLabel {
        if self.decision_function(features) < 0.0 {
            OutlierLabel::Outlier
        } else {
            OutlierLabel::Inlier
        }
    }
}

fn path_length(tree: &[IsoNode], features: &[f64; FEATURE_DIM]) -> f64 {
    let mut idx = 0;
    let mut depth = 0.0;
    loop {
        match &tree[idx] {
            IsoNode::Leaf { size } => return depth + average_path_length(*size),
            IsoNode::Split { feature, threshold, left, right } => {
                depth += 1.0;
                idx = if features[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}

/// c(n): average path length of an unsuccessful BST search over n samples.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let nf = n as f64;
            2.0 * ((nf - 1.0).ln() + EULER_GAMMA) - 2.0 * (nf - 1.0) / nf
        }
    }
}
