//! Forecast source configuration: Open-Meteo client settings, location and models.

use domain::value_objects::{GeoLocation, SpeedUnit};
use integration_weather::WeatherConfig as ClientConfig;
use serde::{Deserialize, Serialize};

// ==============================
// Weather Configuration
// ==============================

/// Weather service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-16)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Cache TTL in minutes
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,

    /// Unit requested from the API
    #[serde(default)]
    pub wind_speed_unit: SpeedUnit,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    3
}

const fn default_cache_ttl_minutes() -> u32 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_secs: default_weather_timeout(),
            forecast_days: default_forecast_days(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            wind_speed_unit: SpeedUnit::default(),
        }
    }
}

impl WeatherConfig {
    /// Settings for the Open-Meteo HTTP client
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            forecast_days: self.forecast_days,
            cache_ttl_minutes: self.cache_ttl_minutes,
            wind_speed_unit: self.wind_speed_unit,
        }
    }
}

// ==============================
// Location Configuration
// ==============================

/// The forecast location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name
    #[serde(default = "default_location_name")]
    pub name: String,

    /// Latitude (-90.0 to 90.0)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude (-180.0 to 180.0)
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_location_name() -> String {
    "Osório, RS".to_string()
}

const fn default_latitude() -> f64 {
    -29.8889
}

const fn default_longitude() -> f64 {
    -50.2667
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
        }
    }
}

impl LocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

// ==============================
// Forecast Sources
// ==============================

/// One Open-Meteo model contributing to the fused series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier reported in source statuses
    pub id: String,

    /// Display name
    pub name: String,

    /// Open-Meteo `models` value, `None` for best match
    #[serde(default)]
    pub model: Option<String>,

    /// Fusion weight (> 0)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

impl SourceConfig {
    /// Open-Meteo's best-match model
    #[must_use]
    pub fn best_match() -> Self {
        Self {
            id: "open_meteo".to_string(),
            name: "Open-Meteo".to_string(),
            model: None,
            weight: default_weight(),
        }
    }
}

pub(crate) fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::best_match()]
}
