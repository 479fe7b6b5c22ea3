#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for the air-map system.
//!
//! Defines the city reference type, the hourly traffic/AQI observation
//! point, the prediction scenario and result types, and the AQI category
//! classifier. Everything here is plain data: no I/O, no hidden state.
//! The simulator, predictor, lookup, and export crates all speak these
//! types.

pub mod category;

use serde::{Deserialize, Serialize};

pub use category::{AqiCategory, classify};

/// A monitored city with its intrinsic pollution and traffic baselines.
///
/// Immutable reference data. Catalog cities are seeded from embedded TOML
/// configs; a one-off "custom area" city may be built from a map click via
/// [`City::custom_area`] but is never persisted or added to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Unique identifier (e.g., `"delhi"`).
    pub id: String,
    /// Human-readable name (e.g., `"New Delhi"`).
    pub name: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
    /// Intrinsic pollution baseline (ambient AQI with no traffic load).
    pub base_aqi: f64,
    /// Intrinsic traffic baseline (vehicles per hour at normal load).
    pub base_traffic: f64,
    /// Free-text description shown in city pickers.
    pub description: String,
}

impl City {
    /// Builds the ad-hoc "custom area" city for an arbitrary map
    /// coordinate, seeded with an observed (or estimated) AQI and a
    /// traffic estimate.
    #[must_use]
    pub fn custom_area(lat: f64, lng: f64, base_aqi: f64, base_traffic: f64) -> Self {
        Self {
            id: "custom_area".to_string(),
            name: format!("Area ({lat:.3}, {lng:.3})"),
            lat,
            lng,
            base_aqi,
            base_traffic,
            description: "Custom selected location on map".to_string(),
        }
    }
}

/// One hour-slot of a generated traffic/AQI time series.
///
/// Invariants upheld by the simulator: `heavy_vehicle_count <=
/// vehicle_count`, `avg_speed >= 5`, `aqi >= 30`, `pm25 >= 15`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficDataPoint {
    /// Sequence index within the series.
    pub id: usize,
    /// Hour label in `"HH:00"` form.
    pub time_slot: String,
    /// Total vehicles for the hour.
    pub vehicle_count: u32,
    /// Heavy (diesel/freight) vehicles, a subset of `vehicle_count`.
    pub heavy_vehicle_count: u32,
    /// Average traffic speed in km/h.
    pub avg_speed: u32,
    /// Simulated Air Quality Index for the hour.
    pub aqi: u32,
    /// Simulated PM2.5 concentration for the hour.
    pub pm25: u32,
}

/// A traffic scenario fed to the regression predictor.
///
/// Mutated interactively by callers between predictions; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Total vehicles per hour.
    pub vehicle_count: f64,
    /// Fraction of heavy vehicles, 0 to 1.
    pub heavy_vehicle_ratio: f64,
    /// Average traffic speed in km/h.
    pub avg_speed: f64,
    /// Fraction of electric vehicles in the fleet, 0 to 1.
    pub ev_adoption: f64,
    /// Whether the odd-even license plate restriction is active.
    pub is_odd_even_policy: bool,
}

/// Output of the regression predictor for a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Predicted AQI, clamped to `[10, 500]`.
    pub predicted_aqi: i64,
    /// Category bucket for the predicted AQI.
    pub category: AqiCategory,
    /// Display color (hex) for the category.
    pub color: String,
    /// One-line category description.
    pub description: String,
    /// Narrative explanation of the dominant contributing factors.
    pub impact_analysis: String,
}

/// Static descriptive metrics for the regression model.
///
/// These are fixed constants describing the offline training run that
/// produced the model coefficients; they are not computed from data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// Mean absolute error on the held-out set, in AQI points.
    pub mean_absolute_error: f64,
    /// Number of samples in the training set.
    pub training_size: u32,
    /// Human-readable feature names.
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_area_formats_coordinates() {
        let city = City::custom_area(28.6139, 77.209, 180.0, 1500.0);
        assert_eq!(city.id, "custom_area");
        assert_eq!(city.name, "Area (28.614, 77.209)");
        assert!((city.base_aqi - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn traffic_data_point_serializes_camel_case() {
        let point = TrafficDataPoint {
            id: 0,
            time_slot: "08:00".to_string(),
            vehicle_count: 2200,
            heavy_vehicle_count: 220,
            avg_speed: 32,
            aqi: 180,
            pm25: 99,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["timeSlot"], "08:00");
        assert_eq!(json["heavyVehicleCount"], 220);
        assert_eq!(json["pm25"], 99);
    }
}
