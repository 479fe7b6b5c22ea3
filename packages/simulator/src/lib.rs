#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic hourly traffic and AQI time-series generator.
//!
//! Produces a trailing window of hourly [`TrafficDataPoint`]s for a city,
//! ending at the current wall-clock hour. Traffic volume follows a diurnal
//! pattern (peak / night / normal day multipliers on the city baseline)
//! with bounded uniform jitter; speed falls off with volume; AQI is
//! composed from ambient background, per-vehicle emissions with an idling
//! penalty, heavy vehicle emissions, and a weather jitter term.
//!
//! Every call draws fresh randomness, so two series for the same city are
//! structurally identical but numerically independent. Nothing is cached
//! or mutated after creation. The tuned multipliers below are fixed
//! configuration constants, not values derived from data.

use air_map_catalog::{CityCatalog, CityDefinition};
use air_map_models::{City, TrafficDataPoint};
use chrono::Timelike;
use rand::Rng;

/// Baseline traffic multiplier during commute peaks (08-11 and 17-20).
const PEAK_MULTIPLIER: f64 = 1.8;

/// Baseline traffic multiplier at night (23-05).
const NIGHT_MULTIPLIER: f64 = 0.2;

/// Baseline traffic multiplier during a normal daytime hour.
const DAY_MULTIPLIER: f64 = 0.9;

/// Uniform jitter applied to hourly traffic, in vehicles.
const TRAFFIC_JITTER: f64 = 100.0;

/// Heavy vehicle share outside night hours.
const DEFAULT_HEAVY_RATIO: f64 = 0.10;

/// Heavy vehicle share at night, when freight restrictions lift.
/// Cities with a catalog `night_heavy_ratio` override replace this.
const NIGHT_HEAVY_RATIO: f64 = 0.40;

/// Nominal hourly road capacity used in the speed falloff formula.
const ROAD_CAPACITY: f64 = 3000.0;

/// Free-flow speed in km/h on an empty road.
const FREE_FLOW_SPEED: f64 = 60.0;

/// Speed lost in km/h when traffic reaches `ROAD_CAPACITY`.
const SPEED_FALLOFF: f64 = 50.0;

/// Uniform jitter applied to speed, in km/h.
const SPEED_JITTER: f64 = 5.0;

/// Minimum reported average speed in km/h.
const MIN_SPEED: f64 = 5.0;

/// Below this speed, idling inflates per-vehicle emissions.
const IDLING_SPEED_THRESHOLD: f64 = 15.0;

/// Per-vehicle emission multiplier while idling.
const IDLING_PENALTY: f64 = 1.5;

/// Share of the city's baseline AQI attributed to non-traffic sources
/// (dust, industry).
const AMBIENT_SHARE: f64 = 0.4;

/// AQI contribution per vehicle.
const VEHICLE_EMISSION: f64 = 0.05;

/// Additional AQI contribution per heavy vehicle.
const HEAVY_EMISSION: f64 = 0.35;

/// Uniform weather jitter applied to the composed AQI.
const WEATHER_JITTER: f64 = 10.0;

/// Floor for the simulated AQI.
const MIN_AQI: f64 = 30.0;

/// PM2.5 as a fraction of AQI.
const PM25_RATIO: f64 = 0.55;

/// Floor for the simulated PM2.5 reading.
const MIN_PM25: f64 = 15.0;

/// Coarse time-of-day bucket driving the traffic multiplier and the
/// heavy vehicle share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Daypart {
    /// Commute peak: 08-11 and 17-20.
    Peak,
    /// Night: 23:00 through 05:00.
    Night,
    /// Any other daytime hour.
    Day,
}

impl Daypart {
    fn of_hour(hour: u32) -> Self {
        if (8..=11).contains(&hour) || (17..=20).contains(&hour) {
            Self::Peak
        } else if hour >= 23 || hour <= 5 {
            Self::Night
        } else {
            Self::Day
        }
    }

    const fn traffic_multiplier(self) -> f64 {
        match self {
            Self::Peak => PEAK_MULTIPLIER,
            Self::Night => NIGHT_MULTIPLIER,
            Self::Day => DAY_MULTIPLIER,
        }
    }
}

/// Baselines driving a simulated series.
///
/// Usually borrowed from a catalog [`CityDefinition`], but the ad-hoc
/// "custom area" [`City`] converts too (with no night freight override).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    /// Intrinsic pollution baseline.
    pub base_aqi: f64,
    /// Intrinsic traffic baseline, vehicles per hour.
    pub base_traffic: f64,
    /// Night-hour heavy vehicle share override, if any.
    pub night_heavy_ratio: Option<f64>,
}

impl From<&CityDefinition> for SimulationProfile {
    fn from(city: &CityDefinition) -> Self {
        Self {
            base_aqi: city.base_aqi,
            base_traffic: city.base_traffic,
            night_heavy_ratio: city.night_heavy_ratio,
        }
    }
}

impl From<&City> for SimulationProfile {
    fn from(city: &City) -> Self {
        Self {
            base_aqi: city.base_aqi,
            base_traffic: city.base_traffic,
            night_heavy_ratio: None,
        }
    }
}

/// Generates a fresh series of `count` hourly points for a city id,
/// ending at the current wall-clock hour.
///
/// Unknown ids resolve to the catalog's default city (see
/// [`CityCatalog::resolve`]); this is a documented fallback, not an error.
#[must_use]
pub fn generate(catalog: &CityCatalog, city_id: &str, count: usize) -> Vec<TrafficDataPoint> {
    let city = catalog.resolve(city_id);
    log::debug!("generating {count} point(s) for {}", city.id);
    generate_series(&SimulationProfile::from(city), count)
}

/// Generates the standard 24-hour trailing window for a city id.
#[must_use]
pub fn generate_day(catalog: &CityCatalog, city_id: &str) -> Vec<TrafficDataPoint> {
    generate(catalog, city_id, 24)
}

/// Returns the single most-recent-hour data point for a city id.
#[must_use]
pub fn current_stats(catalog: &CityCatalog, city_id: &str) -> TrafficDataPoint {
    let city = catalog.resolve(city_id);
    let profile = SimulationProfile::from(city);
    simulate_hour(&profile, current_hour(), 0, &mut rand::rng())
}

/// Generates a fresh series of `count` hourly points for an arbitrary
/// profile, ending at the current wall-clock hour.
#[must_use]
pub fn generate_series(profile: &SimulationProfile, count: usize) -> Vec<TrafficDataPoint> {
    series_anchored(profile, current_hour(), count)
}

fn current_hour() -> u32 {
    chrono::Local::now().hour()
}

/// Builds the series with its last point pinned to `end_hour`. Earlier
/// points step backward through the preceding hours.
fn series_anchored(
    profile: &SimulationProfile,
    end_hour: u32,
    count: usize,
) -> Vec<TrafficDataPoint> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let offset = i64::from(end_hour) - (count as i64 - 1) + i as i64;
            let hour = offset.rem_euclid(24) as u32;
            simulate_hour(profile, hour, i, &mut rng)
        })
        .collect()
}

/// Simulates a single hour-slot.
fn simulate_hour(
    profile: &SimulationProfile,
    hour: u32,
    index: usize,
    rng: &mut impl Rng,
) -> TrafficDataPoint {
    let daypart = Daypart::of_hour(hour);

    let traffic = (profile.base_traffic * daypart.traffic_multiplier()
        + rng.random_range(-TRAFFIC_JITTER..=TRAFFIC_JITTER))
    .max(0.0);

    let heavy_ratio = if daypart == Daypart::Night {
        profile.night_heavy_ratio.unwrap_or(NIGHT_HEAVY_RATIO)
    } else {
        DEFAULT_HEAVY_RATIO
    };

    let vehicle_count = traffic.floor();
    let heavy_vehicle_count = (traffic * heavy_ratio).floor();

    let avg_speed = (FREE_FLOW_SPEED - vehicle_count / ROAD_CAPACITY * SPEED_FALLOFF
        + rng.random_range(-SPEED_JITTER..=SPEED_JITTER))
    .max(MIN_SPEED);

    let speed_penalty = if avg_speed < IDLING_SPEED_THRESHOLD {
        IDLING_PENALTY
    } else {
        1.0
    };

    let raw_aqi = profile.base_aqi * AMBIENT_SHARE
        + vehicle_count * VEHICLE_EMISSION * speed_penalty
        + heavy_vehicle_count * HEAVY_EMISSION
        + rng.random_range(-WEATHER_JITTER..=WEATHER_JITTER);

    let aqi = raw_aqi.max(MIN_AQI).floor();
    let pm25 = (aqi * PM25_RATIO).max(MIN_PM25).floor();

    TrafficDataPoint {
        id: index,
        time_slot: format!("{hour:02}:00"),
        vehicle_count: vehicle_count as u32,
        heavy_vehicle_count: heavy_vehicle_count as u32,
        avg_speed: avg_speed.floor() as u32,
        aqi: aqi as u32,
        pm25: pm25 as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delhi_profile() -> SimulationProfile {
        SimulationProfile {
            base_aqi: 180.0,
            base_traffic: 2200.0,
            night_heavy_ratio: Some(0.55),
        }
    }

    fn plain_profile() -> SimulationProfile {
        SimulationProfile {
            base_aqi: 100.0,
            base_traffic: 1700.0,
            night_heavy_ratio: None,
        }
    }

    #[test]
    fn series_has_requested_length() {
        let profile = plain_profile();
        assert_eq!(generate_series(&profile, 24).len(), 24);
        assert_eq!(generate_series(&profile, 1).len(), 1);
        assert!(generate_series(&profile, 0).is_empty());
    }

    #[test]
    fn every_point_upholds_invariants() {
        let profile = delhi_profile();
        for point in series_anchored(&profile, 9, 48) {
            assert!(
                point.heavy_vehicle_count <= point.vehicle_count,
                "heavy {} exceeds total {} at {}",
                point.heavy_vehicle_count,
                point.vehicle_count,
                point.time_slot
            );
            assert!(point.avg_speed >= 5, "speed below floor at {}", point.time_slot);
            assert!(point.aqi >= 30, "aqi below floor at {}", point.time_slot);
            assert!(point.pm25 >= 15, "pm25 below floor at {}", point.time_slot);
        }
    }

    #[test]
    fn pm25_is_derived_exactly_from_aqi() {
        let profile = plain_profile();
        for point in series_anchored(&profile, 16, 48) {
            let expected = (f64::from(point.aqi) * PM25_RATIO).max(MIN_PM25).floor() as u32;
            assert_eq!(point.pm25, expected, "at {}", point.time_slot);
        }
    }

    #[test]
    fn window_ends_at_anchor_hour() {
        let profile = plain_profile();
        let series = series_anchored(&profile, 13, 24);
        assert_eq!(series[0].time_slot, "14:00");
        assert_eq!(series[23].time_slot, "13:00");

        // Anchors near midnight wrap around.
        let wrapped = series_anchored(&profile, 1, 4);
        let labels: Vec<&str> = wrapped.iter().map(|p| p.time_slot.as_str()).collect();
        assert_eq!(labels, ["22:00", "23:00", "00:00", "01:00"]);
    }

    #[test]
    fn indices_are_sequential() {
        let profile = plain_profile();
        for (i, point) in series_anchored(&profile, 7, 24).iter().enumerate() {
            assert_eq!(point.id, i);
        }
    }

    #[test]
    fn peak_hours_carry_more_traffic_than_night() {
        let profile = plain_profile();
        // 09:00 is peak, 02:00 is night; jitter is ±100 so the multiplier
        // gap (1.8 vs 0.2 on 1700 baseline) dominates.
        let peak = series_anchored(&profile, 9, 1);
        let night = series_anchored(&profile, 2, 1);
        assert!(peak[0].vehicle_count > night[0].vehicle_count);
    }

    #[test]
    fn night_heavy_share_uses_catalog_override() {
        // All four points fall inside the 23-05 night window.
        let restricted = series_anchored(&delhi_profile(), 3, 4);
        for point in restricted {
            let share = f64::from(point.heavy_vehicle_count) / f64::from(point.vehicle_count);
            assert!(share > 0.50, "expected override share, got {share}");
        }

        let standard = series_anchored(&plain_profile(), 3, 4);
        for point in standard {
            let share = f64::from(point.heavy_vehicle_count) / f64::from(point.vehicle_count);
            assert!(
                share > 0.35 && share < 0.45,
                "expected default night share, got {share}"
            );
        }
    }

    #[test]
    fn day_heavy_share_is_low() {
        let series = series_anchored(&plain_profile(), 14, 1);
        let share = f64::from(series[0].heavy_vehicle_count) / f64::from(series[0].vehicle_count);
        assert!(share < 0.15, "expected daytime share near 0.10, got {share}");
    }

    #[test]
    fn repeated_calls_are_structurally_equivalent() {
        let profile = plain_profile();
        let first = series_anchored(&profile, 11, 24);
        let second = series_anchored(&profile, 11, 24);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.time_slot, b.time_slot);
            // Values are independently randomized; only the shape is stable.
        }
    }

    #[test]
    fn catalog_generation_falls_back_for_unknown_id() {
        let catalog = CityCatalog::load().unwrap();
        let series = generate(&catalog, "nowhere", 3);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn generate_day_produces_24_points() {
        let catalog = CityCatalog::load().unwrap();
        assert_eq!(generate_day(&catalog, "mumbai").len(), 24);
    }

    #[test]
    fn current_stats_is_a_single_valid_point() {
        let catalog = CityCatalog::load().unwrap();
        let point = current_stats(&catalog, "pune");
        assert_eq!(point.id, 0);
        assert!(point.heavy_vehicle_count <= point.vehicle_count);
        assert!(point.aqi >= 30);
    }

    #[test]
    fn custom_area_city_converts_to_profile() {
        let city = City::custom_area(28.6, 77.2, 150.0, 1500.0);
        let profile = SimulationProfile::from(&city);
        assert!(profile.night_heavy_ratio.is_none());
        assert_eq!(generate_series(&profile, 24).len(), 24);
    }
}
