//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: Open-Meteo client, location and forecast sources
//! - `analysis`: Event thresholds, windows and table paging

mod analysis;
mod integrations;
mod server;

use std::path::Path;

use application::{
    ApplicationError,
    ports::ForecastRequest,
    services::AnalysisSettings,
};
use chrono::TimeDelta;
use chrono_tz::Tz;
use domain::analysis::DetectionThresholds;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use analysis::AnalysisConfig;
pub use integrations::{LocationConfig, SourceConfig, WeatherConfig};
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment variable prefix, e.g. `WINDWATCH_SERVER__PORT`
pub const ENV_PREFIX: &str = "WINDWATCH";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Open-Meteo client configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Forecast location
    #[serde(default)]
    pub location: LocationConfig,

    /// Analysis thresholds and windows
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Models fused into the hourly series
    #[serde(default = "integrations::default_sources")]
    pub sources: Vec<SourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            location: LocationConfig::default(),
            analysis: AnalysisConfig::default(),
            sources: integrations::default_sources(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.{toml,yaml,json}` in the working
    /// directory and `WINDWATCH_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, still honouring environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file)
            // Override with environment variables (e.g., WINDWATCH_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app: Self = config.try_deserialize()?;
        debug!(
            location = %app.location.name,
            sources = app.sources.len(),
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Check every section, returning the first problem found
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` describing the invalid value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.forecast_request()?;
        self.analysis_settings()?;
        if self.sources.is_empty() {
            return Err(configuration("at least one forecast source is required"));
        }
        for source in &self.sources {
            if !source.weight.is_finite() || source.weight <= 0.0 {
                return Err(configuration(format!(
                    "source '{}' must have a positive weight, got {}",
                    source.id, source.weight
                )));
            }
        }
        if !self.analysis.divergence_threshold_kmh.is_finite()
            || self.analysis.divergence_threshold_kmh < 0.0
        {
            return Err(configuration("divergence threshold must be >= 0"));
        }
        Ok(())
    }

    /// The configured location as a forecast request
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for out-of-range coordinates
    /// or an unknown timezone name.
    pub fn forecast_request(&self) -> Result<ForecastRequest, ApplicationError> {
        let location = self.location.to_geo_location().ok_or_else(|| {
            configuration(format!(
                "invalid coordinates ({}, {})",
                self.location.latitude, self.location.longitude
            ))
        })?;
        let timezone: Tz = self
            .location
            .timezone
            .parse()
            .map_err(|_| configuration(format!("unknown timezone '{}'", self.location.timezone)))?;
        Ok(ForecastRequest::new(
            self.location.name.clone(),
            location,
            timezone,
            self.weather.forecast_days,
        ))
    }

    /// Analysis parameters for the forecast service
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for invalid thresholds or
    /// zero-length windows.
    pub fn analysis_settings(&self) -> Result<AnalysisSettings, ApplicationError> {
        let analysis = &self.analysis;
        let thresholds = DetectionThresholds::new(
            analysis.strong_threshold_kmh,
            analysis.calm_threshold_kmh,
            analysis.max_events,
        )
        .map_err(|e| configuration(e.to_string()))?;

        if analysis.tick_interval_hours == 0 {
            return Err(configuration("tick interval must be at least one hour"));
        }
        if analysis.summary_window_hours == 0 || analysis.chart_window_hours == 0 {
            return Err(configuration("analysis windows must be at least one hour"));
        }
        if analysis.rows_per_page == 0 {
            return Err(configuration("rows per page must be at least one"));
        }

        Ok(AnalysisSettings {
            thresholds,
            tick_interval: TimeDelta::hours(i64::from(analysis.tick_interval_hours)),
            summary_window: TimeDelta::hours(i64::from(analysis.summary_window_hours)),
            chart_window: TimeDelta::hours(i64::from(analysis.chart_window_hours)),
            min_points_for_average: analysis.min_points_for_average,
            rows_per_page: analysis.rows_per_page,
        })
    }
}

fn configuration(message: impl Into<String>) -> ApplicationError {
    ApplicationError::Configuration(message.into())
}
