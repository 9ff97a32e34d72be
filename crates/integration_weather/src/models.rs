//! Hourly forecast models
//!
//! Raw Open-Meteo response types and the parsed hourly forecast handed to
//! the infrastructure adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed forecast hour, speeds in km/h
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: DateTime<Utc>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    /// Degrees the wind blows from, as reported (may be 360)
    pub wind_direction: Option<f64>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
}

/// Hourly forecast for one location and model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone the upstream used for local times
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub elevation: Option<f64>,
    /// Points in ascending time order
    pub points: Vec<HourlyPoint>,
}

// ============================================================================
// Internal API response types
// ============================================================================

/// Open-Meteo forecast response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub hourly_units: Option<HourlyUnits>,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
}

/// Units of the hourly arrays
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HourlyUnits {
    #[serde(default)]
    pub wind_speed_10m: Option<String>,
}

/// Column-oriented hourly arrays; any entry may be `null`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HourlyData {
    /// Local wall-clock times, `YYYY-MM-DDTHH:MM`
    pub time: Vec<String>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

impl HourlyData {
    /// Value of a column at `index`, `None` when absent or short
    pub fn at(column: &[Option<f64>], index: usize) -> Option<f64> {
        column.get(index).copied().flatten()
    }
}
