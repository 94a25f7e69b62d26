//! Fixed-column TLE decoder. Column offsets follow the NORAD two-line
//! element format; the slice bounds below are load-bearing.

use super::{FeatureVector, FEATURE_NAMES};
use thiserror::Error;

/// Minimum length of each TLE line.
pub const TLE_LINE_LEN: usize = 69;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("TLE line {line} is {len} characters, expected at least {TLE_LINE_LEN}")]
    LineTooShort { line: u8, len: usize },
    #[error("TLE field `{name}` at line {line} columns {start}..{end} is not numeric")]
    BadField {
        name: &'static str,
        line: u8,
        start: usize,
        end: usize,
    },
    #[error("TLE field `{name}` decoded to a non-finite value")]
    NonFinite { name: &'static str },
}

fn slice<'a>(
    line: &'a str,
    which: u8,
    name: &'static str,
    start: usize,
    end: usize,
) -> Result<&'a str, TleError> {
    line.get(start..end).ok_or(TleError::BadField {
        name,
        line: which,
        start,
        end,
    })
}

fn field(line: &str, which: u8, name: &'static str, start: usize, end: usize) -> Result<f64, TleError> {
    let raw = slice(line, which, name, start, end)?;
    raw.trim().parse::<f64>().map_err(|_| TleError::BadField {
        name,
        line: which,
        start,
        end,
    })
}

/// The eccentricity digits encode the fractional part of a value below 1;
/// a leading "0." is implied.
fn implied_decimal(line: &str, name: &'static str, start: usize, end: usize) -> Result<f64, TleError> {
    let raw = slice(line, 2, name, start, end)?;
    format!("0.{}", raw.trim())
        .parse::<f64>()
        .map_err(|_| TleError::BadField {
            name,
            line: 2,
            start,
            end,
        })
}

/// Decode a TLE pair into the eight-field feature vector. Returns a
/// complete vector or an error; there is no partial success.
pub fn extract(line1: &str, line2: &str) -> Result<FeatureVector, TleError> {
    if line1.len() < TLE_LINE_LEN {
        return Err(TleError::LineTooShort { line: 1, len: line1.len() });
    }
    if line2.len() < TLE_LINE_LEN {
        return Err(TleError::LineTooShort { line: 2, len: line2.len() });
    }

    let first_derivative_mean_motion = field(line1, 1, "first_derivative_mean_motion", 33, 43)?;

    // BSTAR is mantissa times 10^(-exponent); the exponent digits are a
    // plain signed integer, not themselves power-encoded.
    let bstar_mantissa = field(line1, 1, "bstar_drag", 53, 59)?;
    let bstar_exponent = field(line1, 1, "bstar_drag", 59, 61)?;
    let bstar_drag = bstar_mantissa * 10f64.powf(-bstar_exponent);

    let features = FeatureVector {
        inclination: field(line2, 2, "inclination", 8, 16)?,
        raan: field(line2, 2, "raan", 17, 25)?,
        eccentricity: implied_decimal(line2, "eccentricity", 26, 33)?,
        arg_of_perigee: field(line2, 2, "arg_of_perigee", 34, 42)?,
        mean_anomaly: field(line2, 2, "mean_anomaly", 43, 51)?,
        mean_motion: field(line2, 2, "mean_motion", 52, 63)?,
        bstar_drag,
        first_derivative_mean_motion,
    };

    for (name, value) in FEATURE_NAMES.into_iter().zip(features.to_array()) {
        if !value.is_finite() {
            return Err(TleError::NonFinite { name });
        }
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn iss_reference_values() {
        let f = extract(ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(f.inclination, 51.6416);
        assert_eq!(f.raan, 247.4627);
        assert_eq!(f.eccentricity, 0.0006703);
        assert_eq!(f.arg_of_perigee, 130.5360);
        assert_eq!(f.mean_anomaly, 325.0288);
        assert_eq!(f.mean_motion, 15.72125391);
        assert_eq!(f.first_derivative_mean_motion, -0.00002182);
        // mantissa -11606, plain exponent -4
        assert!((f.bstar_drag - (-11606.0e4)).abs() < 1e-3);
        assert!(f.is_finite());
    }

    #[test]
    fn eccentricity_implied_decimal_point() {
        let mut line2 = String::from(ISS_LINE2);
        line2.replace_range(26..33, "1234567");
        let f = extract(ISS_LINE1, &line2).unwrap();
        assert_eq!(f.eccentricity, 0.1234567);
    }

    #[test]
    fn short_line_rejected() {
        let err = extract(&ISS_LINE1[..40], ISS_LINE2).unwrap_err();
        assert!(matches!(err, TleError::LineTooShort { line: 1, .. }));
        let err = extract(ISS_LINE1, "2 25544").unwrap_err();
        assert!(matches!(err, TleError::LineTooShort { line: 2, .. }));
    }

    #[test]
    fn non_numeric_column_rejected() {
        let mut line2 = String::from(ISS_LINE2);
        line2.replace_range(8..16, "xxxxxxxx");
        let err = extract(ISS_LINE1, &line2).unwrap_err();
        assert!(matches!(err, TleError::BadField { name: "inclination", .. }));
    }

    #[test]
    fn internal_whitespace_rejected() {
        let mut line2 = String::from(ISS_LINE2);
        line2.replace_range(52..63, "15.72 25391");
        assert!(extract(ISS_LINE1, &line2).is_err());
    }
}
