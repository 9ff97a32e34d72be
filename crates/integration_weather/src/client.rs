//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo hourly forecast API.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use domain::value_objects::SpeedUnit;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, HourlyData, HourlyForecast, HourlyPoint};

/// Hourly variables requested from the API
const HOURLY_VARIABLES: &str = "wind_speed_10m,wind_gusts_10m,wind_direction_10m,\
                                temperature_2m,precipitation,precipitation_probability";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-16, default: 3)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Cache TTL in minutes (default: 30)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_minutes: u32,

    /// Unit requested from the API; readings are converted to km/h
    #[serde(default)]
    pub wind_speed_unit: SpeedUnit,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_forecast_days() -> u8 {
    3
}

const fn default_cache_ttl() -> u32 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
            cache_ttl_minutes: default_cache_ttl(),
            wind_speed_unit: SpeedUnit::default(),
        }
    }
}

/// Parameters of an hourly forecast request
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone for local times, or `auto`
    pub timezone: String,
    pub days: u8,
    /// Forecast model, `None` for Open-Meteo's best match
    pub model: Option<String>,
}

impl HourlyQuery {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, timezone: impl Into<String>, days: u8) -> Self {
        Self {
            latitude,
            longitude,
            timezone: timezone.into(),
            days,
            model: None,
        }
    }

    /// Request a specific forecast model
    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Weather client trait for fetching hourly forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the hourly forecast for a location
    async fn get_hourly(&self, query: &HourlyQuery) -> Result<HourlyForecast, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for an hourly request
    fn build_hourly_url(&self, query: &HourlyQuery) -> String {
        let days = query.days.clamp(1, 16);
        let mut url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&timezone={}&forecast_days={}&wind_speed_unit={}",
            self.config.base_url,
            query.latitude,
            query.longitude,
            HOURLY_VARIABLES,
            query.timezone,
            days,
            self.config.wind_speed_unit.api_name(),
        );
        if let Some(model) = &query.model {
            url.push_str("&models=");
            url.push_str(model);
        }
        url
    }

    /// Parse a local wall-clock time and shift it to UTC
    fn parse_local_time(s: &str, utc_offset_seconds: i32) -> Result<DateTime<Utc>, WeatherError> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|e| WeatherError::ParseError(format!("Invalid datetime {s}: {e}")))?;
        let utc = naive - TimeDelta::seconds(i64::from(utc_offset_seconds));
        Ok(Utc.from_utc_datetime(&utc))
    }

    /// Convert the column arrays into points, speeds in km/h
    fn parse_hourly(
        hourly: &HourlyData,
        utc_offset_seconds: i32,
        unit: SpeedUnit,
    ) -> Result<Vec<HourlyPoint>, WeatherError> {
        let kmh = |value: Option<f64>| value.map(|v| unit.to_kmh(v));

        hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, time)| {
                Ok(HourlyPoint {
                    time: Self::parse_local_time(time, utc_offset_seconds)?,
                    wind_speed: kmh(HourlyData::at(&hourly.wind_speed_10m, i)),
                    wind_gust: kmh(HourlyData::at(&hourly.wind_gusts_10m, i)),
                    wind_direction: HourlyData::at(&hourly.wind_direction_10m, i),
                    temperature: HourlyData::at(&hourly.temperature_2m, i),
                    precipitation: HourlyData::at(&hourly.precipitation, i),
                    precipitation_probability: HourlyData::at(&hourly.precipitation_probability, i),
                })
            })
            .collect()
    }

    /// Unit the response reports, falling back to the requested one
    fn response_unit(&self, response: &ApiResponse) -> SpeedUnit {
        response
            .hourly_units
            .as_ref()
            .and_then(|units| units.wind_speed_10m.as_deref())
            .and_then(|unit| unit.parse().ok())
            .unwrap_or(self.config.wind_speed_unit)
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %query.latitude, lon = %query.longitude, model = ?query.model))]
    async fn get_hourly(&self, query: &HourlyQuery) -> Result<HourlyForecast, WeatherError> {
        Self::validate_coordinates(query.latitude, query.longitude)?;

        let url = self.build_hourly_url(query);
        debug!(url = %url, "Fetching hourly forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let hourly = api_response.hourly.as_ref().ok_or_else(|| {
            WeatherError::ParseError("No hourly forecast data in response".to_string())
        })?;

        let unit = self.response_unit(&api_response);
        let points = Self::parse_hourly(hourly, api_response.utc_offset_seconds, unit)?;
        debug!(points = points.len(), unit = %unit, "Parsed hourly forecast");

        Ok(HourlyForecast {
            latitude: api_response.latitude,
            longitude: api_response.longitude,
            timezone: api_response.timezone,
            utc_offset_seconds: api_response.utc_offset_seconds,
            elevation: api_response.elevation,
            points,
        })
    }

    async fn is_healthy(&self) -> bool {
        // Single-day request at the reference location
        let query = HourlyQuery::new(-29.8889, -50.2667, "auto", 1);
        self.get_hourly(&query).await.is_ok()
    }
}
