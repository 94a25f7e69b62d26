//! TLE catalog acquisition and labeled dataset preparation for the
//! offline training pipeline. The request path never touches this module.

mod fetch;

pub use fetch::{fetch_catalog, CELESTRAK_ACTIVE_URL};

use crate::features::{self, FeatureVector, TleError};
use crate::logging::StructuredLogger;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("catalog download failed: {0}")]
    Http(String),
    #[error("failed to write dataset: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
enum CatalogError {
    #[error(transparent)]
    Tle(#[from] TleError),
    #[error("catalog field `{name}` is not numeric")]
    BadField { name: &'static str },
}

/// Fully parsed catalog record: bookkeeping fields plus the eight model
/// features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSatellite {
    pub name: String,
    pub norad_cat_id: u32,
    pub classification: char,
    pub int_designator: String,
    pub epoch_year: u16,
    pub epoch_day: f64,
    pub second_derivative_mean_motion: f64,
    pub ephemeris_type: u8,
    pub element_set_number: u16,
    pub rev_number: u32,
    #[serde(flatten)]
    pub features: FeatureVector,
}

/// Catalog record plus its training label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSatellite {
    #[serde(flatten)]
    pub satellite: CatalogSatellite,
    pub anomaly_label: bool,
}

fn int_field<T: std::str::FromStr>(
    line: &str,
    name: &'static str,
    start: usize,
    end: usize,
) -> Result<T, CatalogError> {
    line.get(start..end)
        .and_then(|s| s.trim().parse::<T>().ok())
        .ok_or(CatalogError::BadField { name })
}

fn float_field(line: &str, name: &'static str, start: usize, end: usize) -> Result<f64, CatalogError> {
    line.get(start..end)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or(CatalogError::BadField { name })
}

fn parse_entry(name: &str, line1: &str, line2: &str) -> Result<CatalogSatellite, CatalogError> {
    let features = features::extract(line1, line2)?;

    // Mantissa times 10^(-exponent), same plain-integer-exponent encoding
    // as the BSTAR term.
    let sdm_mantissa = float_field(line1, "second_derivative_mean_motion", 44, 50)?;
    let sdm_exponent = float_field(line1, "second_derivative_mean_motion", 50, 52)?;

    Ok(CatalogSatellite {
        name: name.to_string(),
        norad_cat_id: int_field(line1, "norad_cat_id", 2, 7)?,
        classification: line1
            .get(7..8)
            .and_then(|s| s.chars().next())
            .ok_or(CatalogError::BadField { name: "classification" })?,
        int_designator: line1
            .get(9..17)
            .ok_or(CatalogError::BadField { name: "int_designator" })?
            .trim()
            .to_string(),
        epoch_year: int_field(line1, "epoch_year", 18, 20)?,
        epoch_day: float_field(line1, "epoch_day", 20, 32)?,
        second_derivative_mean_motion: sdm_mantissa * 10f64.powf(-sdm_exponent),
        ephemeris_type: int_field(line1, "ephemeris_type", 62, 63)?,
        element_set_number: int_field(line1, "element_set_number", 64, 68)?,
        rev_number: int_field(line2, "rev_number", 63, 68)?,
        features,
    })
}

/// Parse name/line1/line2 triplets from raw catalog text. Malformed
/// entries are skipped with a warning; the batch never aborts.
pub fn parse_catalog(text: &str) -> Vec<CatalogSatellite> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    for chunk in lines.chunks(3) {
        let [name, line1, line2] = chunk else {
            break;
        };
        match parse_entry(name.trim(), line1.trim(), line2.trim()) {
            Ok(satellite) => out.push(satellite),
            Err(e) => warn!(name = name.trim(), error = %e, "skipping malformed TLE entry"),
        }
    }
    out
}

/// Synthetic anomaly injection mirroring the offline training recipe:
/// a `fraction` of distinct records is labeled anomalous, each perturbed
/// in one uniformly chosen orbital parameter.
pub fn inject_synthetic_anomalies<R: Rng>(
    records: Vec<CatalogSatellite>,
    fraction: f64,
    rng: &mut R,
) -> Vec<LabeledSatellite> {
    let mut labeled: Vec<LabeledSatellite> = records
        .into_iter()
        .map(|satellite| LabeledSatellite {
            satellite,
            anomaly_label: false,
        })
        .collect();

    let count = (labeled.len() as f64 * fraction) as usize;
    if count == 0 {
        return labeled;
    }

    let mut indices: Vec<usize> = (0..labeled.len()).collect();
    indices.shuffle(rng);
    for &idx in indices.iter().take(count) {
        let entry = &mut labeled[idx];
        entry.anomaly_label = true;
        let features = &mut entry.satellite.features;
        match rng.gen_range(0..4) {
            0 => features.inclination += rng.gen_range(0.1..0.5),
            1 => features.eccentricity *= rng.gen_range(1.5..3.0),
            2 => features.bstar_drag *= rng.gen_range(5.0..10.0),
            _ => features.mean_motion += rng.gen_range(0.001..0.005),
        }
    }
    labeled
}

/// Write labeled records as JSON lines for the offline trainers.
pub fn write_dataset(records: &[LabeledSatellite], path: &Path) -> Result<(), DataError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        StructuredLogger::emit_json(record, &mut writer);
    }
    writer.flush()?;
    Ok(())
}
