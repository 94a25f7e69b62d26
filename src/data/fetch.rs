//! Catalog download over HTTPS.

use super::DataError;
use std::time::Duration;
use tracing::info;

/// Active-satellite TLE catalog source.
pub const CELESTRAK_ACTIVE_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle";

/// Download the raw TLE catalog text. One-shot, bounded by timeouts; the
/// caller decides whether a failure halts the pipeline.
pub fn fetch_catalog(url: &str) -> Result<String, DataError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| DataError::Http(e.to_string()))?;

    let res = client
        .get(url)
        .send()
        .map_err(|e| DataError::Http(e.to_string()))?;
    if !res.status().is_success() {
        return Err(DataError::Http(format!("{} from {}", res.status(), url)));
    }
    let body = res.text().map_err(|e| DataError::Http(e.to_string()))?;
    info!(bytes = body.len(), "catalog downloaded");
    Ok(body)
}
