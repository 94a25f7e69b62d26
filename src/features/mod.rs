//! Orbital feature set decoded from TLE data and consumed by the models.

mod tle;

pub use tle::{extract, TleError, TLE_LINE_LEN};

use serde::{Deserialize, Serialize};

/// Number of scalar features fed to every model.
pub const FEATURE_DIM: usize = 8;

/// Feature names in model input order. Scaling and prediction both rely on
/// this order; it matches the column order the scaler was fitted with.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "inclination",
    "raan",
    "eccentricity",
    "arg_of_perigee",
    "mean_anomaly",
    "mean_motion",
    "bstar_drag",
    "first_derivative_mean_motion",
];

/// Orbital feature vector decoded from one TLE pair. Either all eight
/// fields are populated and finite, or extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub inclination: f64,
    pub raan: f64,
    pub eccentricity: f64,
    pub arg_of_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub bstar_drag: f64,
    pub first_derivative_mean_motion: f64,
}

impl FeatureVector {
    /// Values in the fixed input order of [`FEATURE_NAMES`].
    pub fn to_array(&self) -> [f64; FEATURE_DIM] {
        [
            self.inclination,
            self.raan,
            self.eccentricity,
            self.arg_of_perigee,
            self.mean_anomaly,
            self.mean_motion,
            self.bstar_drag,
            self.first_derivative_mean_motion,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}
