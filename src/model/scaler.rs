//! Standard mean/scale feature transform, fitted offline alongside the
//! models and shipped as its own artifact.

use super::ModelLoadError;
use crate::features::{FeatureVector, FEATURE_DIM};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f64; FEATURE_DIM],
    scale: [f64; FEATURE_DIM],
}

impl StandardScaler {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let origin = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
            path: origin.clone(),
            detail: e.to_string(),
        })?;
        Self::from_json(&data, &origin)
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ModelLoadError> {
        let artifact: ScalerArtifact = serde_json::from_str(json).map_err(|e| ModelLoadError::Parse {
            path: origin.to_string(),
            detail: e.to_string(),
        })?;
        let invalid = |detail: String| ModelLoadError::Invalid {
            path: origin.to_string(),
            detail,
        };

        let mean: [f64; FEATURE_DIM] = artifact
            .mean
            .try_into()
            .map_err(|v: Vec<f64>| invalid(format!("mean has {} entries, expected {FEATURE_DIM}", v.len())))?;
        let scale: [f64; FEATURE_DIM] = artifact
            .scale
            .try_into()
            .map_err(|v: Vec<f64>| invalid(format!("scale has {} entries, expected {FEATURE_DIM}", v.len())))?;

        if mean.iter().any(|v| !v.is_finite()) {
            return Err(invalid("mean contains non-finite entries".to_string()));
        }
        if scale.iter().any(|v| !v.is_finite() || *v == 0.0) {
            return Err(invalid("scale entries must be finite and non-zero".to_string()));
        }
        Ok(Self { mean, scale })
    }

    pub fn transform(&self, features: &FeatureVector) -> [f64; FEATURE_DIM] {
        let mut out = features.to_array();
        for i in 0..FEATURE_DIM {
            out[i] = (out[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_standardizes() {
        let json = r#"{
            "mean":  [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "scale": [2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        }"#;
        let scaler = StandardScaler::from_json(json, "test").unwrap();
        let features = FeatureVector {
            inclination: 5.0,
            raan: 3.0,
            eccentricity: 0.0,
            arg_of_perigee: 0.0,
            mean_anomaly: 0.0,
            mean_motion: 0.0,
            bstar_drag: 0.0,
            first_derivative_mean_motion: 0.0,
        };
        let scaled = scaler.transform(&features);
        assert_eq!(scaled[0], 2.0);
        assert_eq!(scaled[1], 3.0);
    }

    #[test]
    fn zero_scale_rejected() {
        let json = r#"{
            "mean":  [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "scale": [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        }"#;
        assert!(matches!(
            StandardScaler::from_json(json, "test"),
            Err(ModelLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn wrong_arity_rejected() {
        let json = r#"{ "mean": [0.0], "scale": [1.0] }"#;
        assert!(matches!(
            StandardScaler::from_json(json, "test"),
            Err(ModelLoadError::Invalid { .. })
        ));
    }
}
