#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the air-map toolkit.
//!
//! Ties the catalog, simulator, predictor, lookup adapter, and CSV export
//! together behind one binary. The `live` subcommand is the only network
//! user; everything else runs entirely offline on simulated data.
//!
//! Set `WAQI_API_TOKEN` to enable live station lookups.

use std::fs::File;
use std::path::PathBuf;

use air_map_catalog::{CityCatalog, CityDefinition};
use air_map_export::DEFAULT_EXPORT_FILENAME;
use air_map_lookup::estimate_traffic_from_aqi;
use air_map_models::{PredictionInput, TrafficDataPoint};
use clap::{Parser, Subcommand};

/// Environment variable holding the WAQI API credential.
const TOKEN_ENV_VAR: &str = "WAQI_API_TOKEN";

#[derive(Parser)]
#[command(name = "air-map", about = "Traffic-driven AQI estimation toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the monitored city catalog
    Cities,
    /// Print the trailing hourly traffic/AQI series for a city
    Series {
        /// City id (defaults to the catalog default)
        #[arg(long)]
        city: Option<String>,
        /// Number of trailing hours to generate
        #[arg(long, default_value_t = 24)]
        count: usize,
    },
    /// Print the single most-recent-hour stats for a city
    Current {
        /// City id (defaults to the catalog default)
        #[arg(long)]
        city: Option<String>,
    },
    /// Predict the AQI for a traffic scenario
    Predict {
        /// Total vehicles per hour
        #[arg(long)]
        vehicles: f64,
        /// Fraction of heavy vehicles, 0 to 1
        #[arg(long, default_value_t = 0.1)]
        heavy_ratio: f64,
        /// Average traffic speed in km/h
        #[arg(long)]
        speed: f64,
        /// Fraction of electric vehicles, 0 to 1
        #[arg(long, default_value_t = 0.0)]
        ev: f64,
        /// Apply the odd-even license plate restriction
        #[arg(long)]
        odd_even: bool,
    },
    /// Fetch live station readings, falling back to simulation
    Live {
        /// City id (defaults to the catalog default)
        #[arg(long)]
        city: Option<String>,
        /// Query every catalog city concurrently
        #[arg(long)]
        all: bool,
    },
    /// Write a 24-hour snapshot CSV for a city
    Export {
        /// City id (defaults to the catalog default)
        #[arg(long)]
        city: Option<String>,
        /// Output path
        #[arg(long, default_value = DEFAULT_EXPORT_FILENAME)]
        output: PathBuf,
    },
    /// Print the static regression model metrics
    Metrics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let catalog = CityCatalog::load()?;

    match cli.command {
        Commands::Cities => list_cities(&catalog),
        Commands::Series { city, count } => {
            let city = resolve(&catalog, city.as_deref());
            print_series(city, &air_map_simulator::generate(&catalog, &city.id, count));
        }
        Commands::Current { city } => {
            let city = resolve(&catalog, city.as_deref());
            let point = air_map_simulator::current_stats(&catalog, &city.id);
            println!("{} — latest hour", city.name);
            print_point(&point);
        }
        Commands::Predict {
            vehicles,
            heavy_ratio,
            speed,
            ev,
            odd_even,
        } => run_predict(&PredictionInput {
            vehicle_count: vehicles,
            heavy_vehicle_ratio: heavy_ratio,
            avg_speed: speed,
            ev_adoption: ev,
            is_odd_even_policy: odd_even,
        }),
        Commands::Live { city, all } => run_live(&catalog, city.as_deref(), all).await?,
        Commands::Export { city, output } => {
            let city = resolve(&catalog, city.as_deref());
            let series = air_map_simulator::generate_day(&catalog, &city.id);
            air_map_export::write_csv(File::create(&output)?, &series)?;
            log::info!("Wrote {} rows to {}", series.len(), output.display());
            println!("Exported {} snapshot to {}", city.name, output.display());
        }
        Commands::Metrics => print_metrics(),
    }

    Ok(())
}

/// Resolves an optional city id argument against the catalog, logging
/// when an unknown id falls back to the default city.
fn resolve<'a>(catalog: &'a CityCatalog, id: Option<&str>) -> &'a CityDefinition {
    match id {
        Some(id) => {
            let city = catalog.resolve(id);
            if city.id != id {
                log::warn!("unknown city id '{id}', using default '{}'", city.id);
            }
            city
        }
        None => catalog.default_city(),
    }
}

fn list_cities(catalog: &CityCatalog) {
    println!("{:<12} {:<12} {:>9} {:>13}  description", "id", "name", "base AQI", "base traffic");
    for city in catalog.cities() {
        println!(
            "{:<12} {:<12} {:>9} {:>13}  {}",
            city.id, city.name, city.base_aqi, city.base_traffic, city.description
        );
    }
}

fn print_series(city: &CityDefinition, series: &[TrafficDataPoint]) {
    println!("{} — trailing {} hour(s)", city.name, series.len());
    println!(
        "{:<6} {:>9} {:>7} {:>7} {:>5} {:>6}",
        "time", "vehicles", "heavy", "km/h", "AQI", "PM2.5"
    );
    for point in series {
        println!(
            "{:<6} {:>9} {:>7} {:>7} {:>5} {:>6}",
            point.time_slot,
            point.vehicle_count,
            point.heavy_vehicle_count,
            point.avg_speed,
            point.aqi,
            point.pm25
        );
    }
}

fn print_point(point: &TrafficDataPoint) {
    let category = air_map_models::classify(f64::from(point.aqi));
    println!("  time      {}", point.time_slot);
    println!("  vehicles  {}", point.vehicle_count);
    println!("  heavy     {}", point.heavy_vehicle_count);
    println!("  speed     {} km/h", point.avg_speed);
    println!("  AQI       {} ({category})", point.aqi);
    println!("  PM2.5     {}", point.pm25);
}

fn run_predict(input: &PredictionInput) {
    let result = air_map_predictor::predict(input);
    println!("Predicted AQI: {} ({})", result.predicted_aqi, result.category);
    println!("{}", result.description);
    println!("{}", result.impact_analysis);
}

fn print_metrics() {
    let metrics = air_map_predictor::model_metrics();
    println!("R²                  {}", metrics.r_squared);
    println!("Mean absolute error {}", metrics.mean_absolute_error);
    println!("Training samples    {}", metrics.training_size);
    println!("Features            {}", metrics.features.join(", "));
}

/// Runs live lookups for one city or the whole catalog.
///
/// The fallback policy lives here, at the consumer: a lookup error or an
/// empty result is logged and replaced with the simulated current stats
/// for that city. Catalog-wide lookups run concurrently; each round-trip
/// is independent.
async fn run_live(
    catalog: &CityCatalog,
    city_id: Option<&str>,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var(TOKEN_ENV_VAR)
        .map_err(|_| format!("{TOKEN_ENV_VAR} is not set; live lookups need a WAQI credential"))?;
    let client = reqwest::Client::new();

    if all {
        let lookups = catalog.cities().iter().map(|city| {
            let client = &client;
            let token = token.as_str();
            async move {
                (
                    city,
                    air_map_lookup::fetch_real_air_quality(client, token, city.lat, city.lng)
                        .await,
                )
            }
        });
        for (city, outcome) in futures::future::join_all(lookups).await {
            report_live(catalog, city, outcome);
        }
    } else {
        let city = resolve(catalog, city_id);
        let outcome =
            air_map_lookup::fetch_real_air_quality(&client, &token, city.lat, city.lng).await;
        report_live(catalog, city, outcome);
    }

    Ok(())
}

/// Prints one city's live reading, substituting simulated stats when the
/// lookup yielded nothing.
fn report_live(
    catalog: &CityCatalog,
    city: &CityDefinition,
    outcome: Result<Option<air_map_lookup::AirQualityReading>, air_map_lookup::LookupError>,
) {
    let reading = match outcome {
        Ok(Some(reading)) => Some(reading),
        Ok(None) => {
            log::warn!("no station data near {}, falling back to simulation", city.id);
            None
        }
        Err(e) => {
            log::warn!("lookup failed for {}: {e}, falling back to simulation", city.id);
            None
        }
    };

    match reading {
        Some(reading) => {
            let traffic = estimate_traffic_from_aqi(reading.aqi as f64, city.base_traffic);
            println!(
                "{:<12} AQI {:>4}  PM2.5 {:>4}  est. traffic {:>5}  (live, {})",
                city.name,
                reading.aqi,
                reading.pm25,
                traffic,
                reading.observed_at.format("%H:%M UTC")
            );
        }
        None => {
            let point = air_map_simulator::current_stats(catalog, &city.id);
            println!(
                "{:<12} AQI {:>4}  PM2.5 {:>4}  est. traffic {:>5}  (simulated)",
                city.name, point.aqi, point.pm25, point.vehicle_count
            );
        }
    }
}
