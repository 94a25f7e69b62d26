//! Gradient-boosted binary classifier: margin accumulation over
//! regression trees, squashed through a sigmoid.

use super::{sigmoid, ModelLoadError};
use crate::features::FEATURE_DIM;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Node-indexed tree representation; index 0 is the root. Split edges
/// always point forward so traversal terminates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Deserialize)]
struct GbdtArtifact {
    base_score: f64,
    trees: Vec<Vec<TreeNode>>,
}

/// Boosted-tree scorer. Prediction is `sigmoid(logit(base) + sum of leaf
/// margins)`, the binary-logistic objective.
#[derive(Debug)]
pub struct GradientBoostedModel {
    base_margin: f64,
    trees: Vec<Vec<TreeNode>>,
}

impl GradientBoostedModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let origin = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
            path: origin.clone(),
            detail: e.to_string(),
        })?;
        Self::from_json(&data, &origin)
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ModelLoadError> {
        let artifact: GbdtArtifact = serde_json::from_str(json).map_err(|e| ModelLoadError::Parse {
            path: origin.to_string(),
            detail: e.to_string(),
        })?;
        let invalid = |detail: String| ModelLoadError::Invalid {
            path: origin.to_string(),
            detail,
        };

        if !(artifact.base_score > 0.0 && artifact.base_score < 1.0) {
            return Err(invalid(format!("base_score {} outside (0, 1)", artifact.base_score)));
        }
        for (t, tree) in artifact.trees.iter().enumerate() {
            if tree.is_empty() {
                return Err(invalid(format!("tree {t} is empty")));
            }
            for (i, node) in tree.iter().enumerate() {
                match node {
                    TreeNode::Leaf { value } => {
                        if !value.is_finite() {
                            return Err(invalid(format!("tree {t} node {i}: non-finite leaf")));
                        }
                    }
                    TreeNode::Split { feature, threshold, left, right } => {
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
        }

        let base = artifact.base_score;
        Ok(Self {
            base_margin: (base / (1.0 - base)).ln(),
            trees: artifact.trees,
        })
    }

    /// Class-1 probability for a scaled feature vector.
    pub fn predict_proba(&self, features: &[f64; FEATURE_DIM]) -> f64 {
        let mut margin = self.base_margin;
        for tree in &self.trees {
            margin += leaf_margin(tree, features);
        }
        sigmoid(margin)
    }
}

fn leaf_margin(tree: &[TreeNode], features: &[f64; FEATURE_DIM]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree[idx] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split { feature, threshold, left, right } => {
                idx = if features[*feature] < *threshold { *left } else { *right };
            }
        }
    }
}
