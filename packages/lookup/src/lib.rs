#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! WAQI station lookup adapter.
//!
//! Fetches the real-world AQI and PM2.5 reading nearest a coordinate from
//! the World Air Quality Index project feed. "No station data" is an
//! expected outcome, not an error: it is modeled as `Ok(None)` so callers
//! are forced to pick a fallback (typically substituting simulated
//! values). Only transport failures and malformed provider responses
//! surface as [`LookupError`]; the fallback policy itself lives in the
//! caller, never in this adapter.
//!
//! Requests are independent round-trips with no shared state, so lookups
//! for many coordinates may run concurrently. There is no retry here; a
//! failed lookup is simply absent data for that coordinate.
//!
//! See <https://aqicn.org/json-api/doc/>

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Base URL of the WAQI geolocated feed endpoint.
pub const WAQI_FEED_URL: &str = "https://api.waqi.info/feed";

/// Multiplicative bounds for the AQI-to-traffic inverse heuristic:
/// 0.3 is empty roads, 2.5 is gridlock.
const TRAFFIC_FACTOR_MIN: f64 = 0.3;
const TRAFFIC_FACTOR_MAX: f64 = 2.5;

/// An AQI considered the baseline for moderate traffic in the inverse
/// heuristic.
const BASELINE_AQI: f64 = 100.0;

/// A real-world air quality observation for a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityReading {
    /// Station-reported Air Quality Index.
    pub aqi: i64,
    /// PM2.5 reading; falls back to the AQI value when the station does
    /// not report PM2.5 separately.
    pub pm25: i64,
    /// When the reading was fetched.
    pub observed_at: DateTime<Utc>,
}

/// Errors from WAQI lookups.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// Fetches the nearest station reading for a coordinate.
///
/// Returns `Ok(None)` when the provider reports no data for the
/// coordinate (non-success HTTP status or a non-`"ok"` status
/// discriminator in the body), so callers can substitute simulated
/// values.
///
/// # Errors
///
/// Returns [`LookupError`] if the HTTP round-trip fails or the response
/// body is not the expected JSON shape.
pub async fn fetch_real_air_quality(
    client: &reqwest::Client,
    token: &str,
    lat: f64,
    lng: f64,
) -> Result<Option<AirQualityReading>, LookupError> {
    let url = format!("{WAQI_FEED_URL}/geo:{lat};{lng}/");
    let resp = client.get(&url).query(&[("token", token)]).send().await?;

    if !resp.status().is_success() {
        log::warn!("WAQI returned HTTP {} for {lat};{lng}", resp.status());
        return Ok(None);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a WAQI feed response body.
///
/// The provider signals "no station" with a non-`"ok"` status
/// discriminator; that maps to `Ok(None)`. A non-numeric AQI is treated
/// as `0` rather than an error, matching the provider's occasional `"-"`
/// placeholder.
fn parse_response(body: &serde_json::Value) -> Result<Option<AirQualityReading>, LookupError> {
    let status = body["status"].as_str().ok_or_else(|| LookupError::Parse {
        message: "WAQI response has no status discriminator".to_string(),
    })?;

    if status != "ok" {
        return Ok(None);
    }

    let data = &body["data"];
    if !data.is_object() {
        return Err(LookupError::Parse {
            message: "WAQI ok-response has no data object".to_string(),
        });
    }

    let aqi = parse_lenient_int(&data["aqi"]);

    // Individual readings live under `iaqi`; PM2.5 is optional and falls
    // back to the composite AQI when absent.
    let pm25 = match &data["iaqi"]["pm25"]["v"] {
        serde_json::Value::Null => aqi,
        value => parse_lenient_int(value),
    };

    Ok(Some(AirQualityReading {
        aqi,
        pm25,
        observed_at: Utc::now(),
    }))
}

/// Parses a numeric field that the provider serializes inconsistently
/// (number, numeric string, or a `"-"` placeholder). Unparseable values
/// become `0`.
fn parse_lenient_int(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(0, |f| f as i64),
        serde_json::Value::String(s) => s.parse::<f64>().map_or(0, |f| f as i64),
        _ => 0,
    }
}

/// Estimates hourly traffic volume from an observed AQI.
///
/// The documented inverse heuristic: an AQI of 100 corresponds to the
/// city's baseline traffic, scaling linearly and clamped between empty
/// roads (0.3x) and gridlock (2.5x).
#[must_use]
pub fn estimate_traffic_from_aqi(observed_aqi: f64, base_traffic: f64) -> i64 {
    let factor = (observed_aqi / BASELINE_AQI).clamp(TRAFFIC_FACTOR_MIN, TRAFFIC_FACTOR_MAX);
    (base_traffic * factor).floor() as i64
}
