#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fixed-coefficient linear regression AQI predictor.
//!
//! Model: `AQI = b0 + b1*vehicle_count + b2*heavy_vehicle_count +
//! b3*avg_speed`, with a policy pre-adjustment, an EV emission discount,
//! and a non-linear congestion penalty on top. The coefficients describe
//! an offline training run and are fixed here; there is no fitting.
//!
//! [`predict`] is a pure, total function: every numeric input is accepted
//! and the output is clamped rather than rejected. Identical inputs always
//! yield identical results.

use air_map_models::{ModelMetrics, PredictionInput, PredictionResult, classify};

/// Regression intercept, in AQI points.
const INTERCEPT: f64 = 35.5;

/// AQI points per vehicle.
const VEHICLE_COEFFICIENT: f64 = 0.082;

/// AQI points per heavy vehicle.
const HEAVY_VEHICLE_COEFFICIENT: f64 = 0.48;

/// AQI points per km/h of average speed (negative: flow clears air).
const SPEED_COEFFICIENT: f64 = -1.15;

/// Fraction of the per-vehicle emission coefficient eliminated at full
/// EV adoption. Never 1.0: brake and tyre particulates remain.
const EV_EMISSION_FACTOR_REDUCTION: f64 = 0.8;

/// Vehicle count multiplier under the odd-even restriction, modeling
/// roughly 40% compliance-driven reduction.
const ODD_EVEN_TRAFFIC_FACTOR: f64 = 0.6;

/// Below this speed the fleet is effectively idling; a flat penalty is
/// added to the regression score.
const CONGESTION_SPEED_THRESHOLD: f64 = 10.0;

/// Flat AQI penalty for idling congestion.
const CONGESTION_PENALTY: f64 = 40.0;

/// Lower clamp for the predicted AQI.
const MIN_PREDICTED_AQI: f64 = 10.0;

/// Upper clamp for the predicted AQI.
const MAX_PREDICTED_AQI: f64 = 500.0;

/// Predicts the AQI for a traffic scenario.
///
/// The odd-even adjustment scales the vehicle count before the heavy
/// vehicle count is derived, so the policy reduces both terms.
#[must_use]
pub fn predict(input: &PredictionInput) -> PredictionResult {
    let vehicle_count = if input.is_odd_even_policy {
        input.vehicle_count * ODD_EVEN_TRAFFIC_FACTOR
    } else {
        input.vehicle_count
    };

    let heavy_vehicle_count = vehicle_count * input.heavy_vehicle_ratio;
    let ev_factor = 1.0 - input.ev_adoption * EV_EMISSION_FACTOR_REDUCTION;

    let mut score = INTERCEPT
        + vehicle_count * VEHICLE_COEFFICIENT * ev_factor
        + heavy_vehicle_count * HEAVY_VEHICLE_COEFFICIENT
        + input.avg_speed * SPEED_COEFFICIENT;

    if input.avg_speed < CONGESTION_SPEED_THRESHOLD {
        score += CONGESTION_PENALTY;
    }

    let predicted_aqi = score.round().clamp(MIN_PREDICTED_AQI, MAX_PREDICTED_AQI) as i64;
    let category = classify(predicted_aqi as f64);

    PredictionResult {
        predicted_aqi,
        category,
        color: category.color().to_string(),
        description: format!("Air quality is considered {category}."),
        impact_analysis: impact_analysis(predicted_aqi, input),
    }
}

/// Builds the impact narrative for a prediction.
///
/// Independent conditions are evaluated in a fixed priority order and the
/// matching sentences joined with spaces. A predicted AQI below 100
/// overrides everything with a single "conditions optimal" sentence.
fn impact_analysis(predicted_aqi: i64, input: &PredictionInput) -> String {
    let mut insights: Vec<String> = Vec::new();

    if input.avg_speed < 15.0 {
        insights.push("Severe congestion is significantly amplifying pollution levels.".to_string());
    }

    if input.heavy_vehicle_ratio > 0.2 {
        insights
            .push("High volume of diesel-heavy transport is a primary contributor.".to_string());
    }

    if input.ev_adoption > 0.3 {
        insights.push(format!(
            "EV adoption of {:.0}% is mitigating potential AQI spikes.",
            input.ev_adoption * 100.0
        ));
    }

    if input.is_odd_even_policy {
        insights.push("Odd-Even policy is active, reducing overall density.".to_string());
    }

    if predicted_aqi > 200 && insights.is_empty() {
        insights.push(
            "Traffic density is simply too high for the current infrastructure.".to_string(),
        );
    }

    if predicted_aqi < 100 {
        return "Conditions are optimal. Traffic flow is smooth and emissions are controlled."
            .to_string();
    }

    if insights.is_empty() {
        "Current traffic mix is resulting in standard emission levels.".to_string()
    } else {
        insights.join(" ")
    }
}

/// Static descriptive metrics for the regression model.
///
/// Fixed constants describing the offline training run; not computed
/// from data.
#[must_use]
pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        r_squared: 0.89,
        mean_absolute_error: 12.4,
        training_size: 5000,
        features: vec![
            "Vehicle Flow".to_string(),
            "Heavy Transport %".to_string(),
            "Average Speed".to_string(),
        ],
    }
}
