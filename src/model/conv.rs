//! 1-D convolutional classifier: conv (ReLU) over the eight-step feature
//! sequence, max-pool of width 2, flatten, dense hidden layer (ReLU),
//! sigmoid output unit.

use super::{sigmoid, ModelLoadError};
use crate::features::FEATURE_DIM;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const POOL_WIDTH: usize = 2;

#[derive(Debug, Deserialize)]
struct ConvArtifact {
    /// One kernel per filter, each `kernel_width` taps wide.
    conv_kernels: Vec<Vec<f64>>,
    conv_bias: Vec<f64>,
    /// Flattened-dim rows by hidden-unit columns.
    hidden_weights: Vec<Vec<f64>>,
    hidden_bias: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
}

pub struct SequenceConvModel {
    kernels: Vec<Vec<f64>>,
    conv_bias: Vec<f64>,
    hidden: Array2<f64>,
    hidden_bias: Array1<f64>,
    output: Array1<f64>,
    output_bias: f64,
    kernel_width: usize,
}

impl SequenceConvModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let origin = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
            path: origin.clone(),
            detail: e.to_string(),
        })?;
        Self::from_json(&data, &origin)
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ModelLoadError> {
        let artifact: ConvArtifact = serde_json::from_str(json).map_err(|e| ModelLoadError::Parse {
            path: origin.to_string(),
            detail: e.to_string(),
        })?;
        let invalid = |detail: String| ModelLoadError::Invalid {
            path: origin.to_string(),
            detail,
        };

        let filters = artifact.conv_kernels.len();
        if filters == 0 {
            return Err(invalid("no convolution filters".to_string()));
        }
        let kernel_width = artifact.conv_kernels[0].len();
        if kernel_width == 0 || kernel_width > FEATURE_DIM {
            return Err(invalid(format!("kernel width {kernel_width} outside 1..={FEATURE_DIM}")));
        }
        if artifact.conv_kernels.iter().any(|k| k.len() != kernel_width) {
            return Err(invalid("convolution kernels differ in width".to_string()));
        }
        if artifact.conv_bias.len() != filters {
            return Err(invalid("conv_bias arity does not match filter count".to_string()));
        }

        let conv_len = FEATURE_DIM - kernel_width + 1;
        let pooled_len = conv_len / POOL_WIDTH;
        if pooled_len == 0 {
            return Err(invalid("pooled sequence is empty".to_string()));
        }
        let flat_dim = pooled_len * filters;
        if artifact.hidden_weights.len() != flat_dim {
            return Err(invalid(format!(
                "hidden_weights has {} rows, expected {flat_dim}",
                artifact.hidden_weights.len()
            )));
        }
        let hidden_units = artifact.hidden_bias.len();
        if hidden_units == 0 || artifact.hidden_weights.iter().any(|r| r.len() != hidden_units) {
            return Err(invalid("hidden layer dimensions are inconsistent".to_string()));
        }
        if artifact.output_weights.len() != hidden_units {
            return Err(invalid("output_weights arity does not match hidden units".to_string()));
        }

        let all_values = artifact
            .conv_kernels
            .iter()
            .flatten()
            .chain(artifact.conv_bias.iter())
            .chain(artifact.hidden_weights.iter().flatten())
            .chain(artifact.hidden_bias.iter())
            .chain(artifact.output_weights.iter())
            .chain(std::iter::once(&artifact.output_bias));
        if all_values.into_iter().any(|v| !v.is_finite()) {
            return Err(invalid("weights contain non-finite values".to_string()));
        }

        let hidden = Array2::from_shape_vec(
            (flat_dim, hidden_units),
            artifact.hidden_weights.concat(),
        )
        .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            kernels: artifact.conv_kernels,
            conv_bias: artifact.conv_bias,
            hidden,
            hidden_bias: Array1::from_vec(artifact.hidden_bias),
            output: Array1::from_vec(artifact.output_weights),
            output_bias: artifact.output_bias,
            kernel_width,
        })
    }

    /// Sigmoid output for a scaled feature vector.
    pub fn predict_proba(&self, features: &[f64; FEATURE_DIM]) -> f64 {
        let filters = self.kernels.len();
        let conv_len = FEATURE_DIM - self.kernel_width + 1;
        let pooled_len = conv_len / POOL_WIDTH;

        // Flatten time-major (step, then filter), matching the exporter.
        let mut flat = Array1::zeros(pooled_len * filters);
        for (f, (kernel, bias)) in self.kernels.iter().zip(&self.conv_bias).enumerate() {
            let mut activation = vec![0.0f64; conv_len];
            for t in 0..conv_len {
                let mut acc = *bias;
                for (j, w) in kernel.iter().enumerate() {
                    acc += w * features[t + j];
                }
                activation[t] = acc.max(0.0);
            }
            for p in 0..pooled_len {
                let window = &activation[POOL_WIDTH * p..POOL_WIDTH * (p + 1)];
                let m = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                flat[p * filters + f] = m;
            }
        }

        let hidden = (flat.dot(&self.hidden) + &self.hidden_bias).mapv(|v| v.max(0.0));
        sigmoid(hidden.dot(&self.output) + self.output_bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 filter of width 3: conv length 6, pooled length 3, flat dim 3.
    fn artifact(output_bias: f64) -> String {
        format!(
            r#"{{
                "conv_kernels": [[0.0, 0.0, 0.0]],
                "conv_bias": [0.0],
                "hidden_weights": [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]],
                "hidden_bias": [0.0, 0.0],
                "output_weights": [0.0, 0.0],
                "output_bias": {output_bias}
            }}"#
        )
    }

    #[test]
    fn output_bias_drives_sigmoid() {
        let model = SequenceConvModel::from_json(&artifact(2.0), "test").unwrap();
        let p = model.predict_proba(&[0.5; FEATURE_DIM]);
        assert!((p - 0.8807970779778823).abs() < 1e-12);

        let model = SequenceConvModel::from_json(&artifact(0.0), "test").unwrap();
        assert_eq!(model.predict_proba(&[0.5; FEATURE_DIM]), 0.5);
    }

    #[test]
    fn single_path_forward_pass() {
        // Kernel sums a 3-step window; identity-ish dense layers pick the
        // first pooled value.
        let json = r#"{
            "conv_kernels": [[1.0, 1.0, 1.0]],
            "conv_bias": [0.0],
            "hidden_weights": [[1.0], [0.0], [0.0]],
            "hidden_bias": [0.0],
            "output_weights": [1.0],
            "output_bias": 0.0
        }"#;
        let model = SequenceConvModel::from_json(json, "test").unwrap();
        let x = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        // conv: [1,0,0,0,0,0] -> pool: [1,0,0] -> hidden relu(1) -> sigmoid(1)
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!((model.predict_proba(&x) - expected).abs() < 1e-12);
    }

    #[test]
    fn inconsistent_dimensions_rejected() {
        let json = r#"{
            "conv_kernels": [[0.0, 0.0, 0.0]],
            "conv_bias": [0.0],
            "hidden_weights": [[0.0]],
            "hidden_bias": [0.0],
            "output_weights": [0.0],
            "output_bias": 0.0
        }"#;
        assert!(matches!(
            SequenceConvModel::from_json(json, "test"),
            Err(ModelLoadError::Invalid { .. })
        ));
    }
}
