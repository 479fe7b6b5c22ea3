#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City catalog — loads all monitored city definitions from embedded TOML
//! configs.
//!
//! Each `.toml` file in `packages/catalog/cities/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a new city is as simple as
//! creating a new TOML file and adding it to the list below.
//!
//! The catalog is an explicitly constructed, read-only object: build it once
//! with [`CityCatalog::load`] and pass it by reference to the simulator and
//! any other consumer. There are no ambient singletons.

use air_map_models::City;
use serde::Deserialize;
use thiserror::Error;

/// TOML configs embedded at compile time, in catalog display order.
/// The first entry doubles as the default city.
const CITY_TOMLS: &[(&str, &str)] = &[
    ("delhi", include_str!("../cities/delhi.toml")),
    ("mumbai", include_str!("../cities/mumbai.toml")),
    ("bangalore", include_str!("../cities/bangalore.toml")),
    ("chennai", include_str!("../cities/chennai.toml")),
    ("kolkata", include_str!("../cities/kolkata.toml")),
    ("hyderabad", include_str!("../cities/hyderabad.toml")),
    ("pune", include_str!("../cities/pune.toml")),
    ("jaipur", include_str!("../cities/jaipur.toml")),
    ("lucknow", include_str!("../cities/lucknow.toml")),
    ("ahmedabad", include_str!("../cities/ahmedabad.toml")),
];

/// Total number of configured cities (used in tests).
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 10;

/// A city definition as loaded from its TOML config.
#[derive(Debug, Clone, Deserialize)]
pub struct CityDefinition {
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
    /// Night-hour heavy vehicle share override for cities with freight
    /// entry restrictions. `None` means the simulator's default applies.
    #[serde(default)]
    pub night_heavy_ratio: Option<f64>,
}

impl CityDefinition {
    /// Converts this definition into the shared [`City`] model type.
    #[must_use]
    pub fn to_city(&self) -> City {
        City {
            id: self.id.clone(),
            name: self.name.clone(),
            lat: self.lat,
            lng: self.lng,
            base_aqi: self.base_aqi,
            base_traffic: self.base_traffic,
            description: self.description.clone(),
        }
    }
}

/// Errors from loading the embedded city catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An embedded TOML config failed to parse.
    #[error("failed to parse {name}.toml: {source}")]
    Parse {
        /// Name of the offending config file (without extension).
        name: String,
        /// The underlying TOML deserialization error.
        source: toml::de::Error,
    },

    /// The embedded config list is empty.
    #[error("city catalog contains no entries")]
    Empty,
}

/// Read-only, ordered catalog of monitored cities.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<CityDefinition>,
}

impl CityCatalog {
    /// Loads and parses all embedded city configs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if an embedded TOML config is
    /// malformed (the configs are baked in at compile time, so this
    /// indicates a programming error rather than an environmental one),
    /// or [`CatalogError::Empty`] if no configs are embedded.
    pub fn load() -> Result<Self, CatalogError> {
        let cities = CITY_TOMLS
            .iter()
            .map(|(name, content)| {
                toml::from_str(content).map_err(|source| CatalogError::Parse {
                    name: (*name).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<CityDefinition>, _>>()?;

        if cities.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { cities })
    }

    /// All cities in catalog display order.
    #[must_use]
    pub fn cities(&self) -> &[CityDefinition] {
        &self.cities
    }

    /// The default city (the first catalog entry).
    #[must_use]
    pub fn default_city(&self) -> &CityDefinition {
        &self.cities[0]
    }

    /// Looks up a city by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CityDefinition> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Resolves a city id, falling back to the default city when the id
    /// is unknown.
    ///
    /// This keeps the time-series pipeline total: consumers that hold a
    /// stale or mistyped id still get a well-formed series rather than a
    /// failure. Callers that need to distinguish unknown ids should use
    /// [`CityCatalog::get`] instead.
    #[must_use]
    pub fn resolve(&self, id: &str) -> &CityDefinition {
        self.get(id).unwrap_or_else(|| self.default_city())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_cities() {
        let catalog = CityCatalog::load().unwrap();
        assert_eq!(catalog.cities().len(), EXPECTED_CITY_COUNT);
    }

    #[test]
    fn city_ids_are_unique() {
        let catalog = CityCatalog::load().unwrap();
        let mut ids: Vec<&str> = catalog.cities().iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXPECTED_CITY_COUNT);
    }

    #[test]
    fn all_cities_have_required_fields() {
        let catalog = CityCatalog::load().unwrap();
        for city in catalog.cities() {
            assert!(!city.id.is_empty(), "city id is empty");
            assert!(!city.name.is_empty(), "{}: name is empty", city.id);
            assert!(!city.description.is_empty(), "{}: no description", city.id);
            assert!(city.base_aqi > 0.0, "{}: base_aqi not positive", city.id);
            assert!(
                city.base_traffic > 0.0,
                "{}: base_traffic not positive",
                city.id
            );
            assert!(
                city.lat.abs() <= 90.0 && city.lng.abs() <= 180.0,
                "{}: coordinates out of range",
                city.id
            );
        }
    }

    #[test]
    fn default_city_is_delhi() {
        let catalog = CityCatalog::load().unwrap();
        assert_eq!(catalog.default_city().id, "delhi");
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        let catalog = CityCatalog::load().unwrap();
        assert_eq!(catalog.resolve("atlantis").id, "delhi");
        assert!(catalog.get("atlantis").is_none());
    }

    #[test]
    fn resolve_finds_known_city() {
        let catalog = CityCatalog::load().unwrap();
        assert_eq!(catalog.resolve("pune").name, "Pune");
    }

    #[test]
    fn only_delhi_overrides_night_heavy_ratio() {
        let catalog = CityCatalog::load().unwrap();
        for city in catalog.cities() {
            if city.id == "delhi" {
                assert_eq!(city.night_heavy_ratio, Some(0.55));
            } else {
                assert!(
                    city.night_heavy_ratio.is_none(),
                    "{}: unexpected night override",
                    city.id
                );
            }
        }
    }

    #[test]
    fn to_city_preserves_baselines() {
        let catalog = CityCatalog::load().unwrap();
        let city = catalog.resolve("mumbai").to_city();
        assert_eq!(city.name, "Mumbai");
        assert!((city.base_traffic - 2500.0).abs() < f64::EPSILON);
    }
}
