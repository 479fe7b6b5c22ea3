#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV snapshot export for generated traffic/AQI series.
//!
//! Writes a tabular snapshot with the columns `TimeSlot, VehicleCount,
//! HeavyVehicleCount, AvgSpeed, AQI, PM2.5` — the interchange format
//! consumed by spreadsheet users and the dataset download surface.

use std::io;

use air_map_models::TrafficDataPoint;
use serde::Serialize;
use thiserror::Error;

/// Default filename for dataset downloads.
pub const DEFAULT_EXPORT_FILENAME: &str = "traffic_aqi_data.csv";

/// Errors from CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One exported CSV row. The field order defines the column order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "TimeSlot")]
    time_slot: &'a str,
    #[serde(rename = "VehicleCount")]
    vehicle_count: u32,
    #[serde(rename = "HeavyVehicleCount")]
    heavy_vehicle_count: u32,
    #[serde(rename = "AvgSpeed")]
    avg_speed: u32,
    #[serde(rename = "AQI")]
    aqi: u32,
    #[serde(rename = "PM2.5")]
    pm25: u32,
}

impl<'a> From<&'a TrafficDataPoint> for ExportRow<'a> {
    fn from(point: &'a TrafficDataPoint) -> Self {
        Self {
            time_slot: &point.time_slot,
            vehicle_count: point.vehicle_count,
            heavy_vehicle_count: point.heavy_vehicle_count,
            avg_speed: point.avg_speed,
            aqi: point.aqi,
            pm25: point.pm25,
        }
    }
}

/// Writes a series as CSV (header row plus one line per point) to any
/// [`io::Write`] sink.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the underlying writer
/// fails.
pub fn write_csv<W: io::Write>(
    writer: W,
    series: &[TrafficDataPoint],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in series {
        csv_writer.serialize(ExportRow::from(point))?;
    }
    csv_writer.flush()?;
    Ok(())
}
