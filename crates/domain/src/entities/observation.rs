//! A single hourly reading of the forecast

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::value_objects::CompassSector;

/// One timestamped forecast reading
///
/// Every channel is optional: upstream sources report `null` for hours they
/// have no value for. Speeds are in km/h, direction is in degrees the wind
/// blows from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Forecast hour in the location's timezone
    #[serde(serialize_with = "crate::serde_time::rfc3339")]
    pub timestamp: DateTime<Tz>,
    /// Sustained wind speed (km/h, >= 0)
    pub wind_speed: Option<f64>,
    /// Gust speed (km/h, >= 0)
    pub wind_gust: Option<f64>,
    /// Wind direction in degrees, `[0, 360)`
    pub wind_direction: Option<f64>,
    /// Air temperature (°C)
    pub temperature: Option<f64>,
    /// Precipitation (mm)
    pub precipitation: Option<f64>,
    /// Precipitation probability (%)
    pub precipitation_probability: Option<f64>,
    /// Sources disagreed on sustained speed by more than the divergence threshold
    pub high_divergence: bool,
}

impl Observation {
    /// Create an observation with no readings
    #[must_use]
    pub const fn new(timestamp: DateTime<Tz>) -> Self {
        Self {
            timestamp,
            wind_speed: None,
            wind_gust: None,
            wind_direction: None,
            temperature: None,
            precipitation: None,
            precipitation_probability: None,
            high_divergence: false,
        }
    }

    /// Create an observation with all three wind channels present
    #[must_use]
    pub fn wind(timestamp: DateTime<Tz>, speed: f64, gust: f64, direction: f64) -> Self {
        Self {
            wind_speed: Some(speed),
            wind_gust: Some(gust),
            wind_direction: Some(direction),
            ..Self::new(timestamp)
        }
    }

    /// Set the sustained wind speed
    #[must_use]
    pub fn with_speed(mut self, speed: Option<f64>) -> Self {
        self.wind_speed = speed;
        self
    }

    /// Set the gust speed
    #[must_use]
    pub fn with_gust(mut self, gust: Option<f64>) -> Self {
        self.wind_gust = gust;
        self
    }

    /// Set the wind direction
    #[must_use]
    pub fn with_direction(mut self, direction: Option<f64>) -> Self {
        self.wind_direction = direction;
        self
    }

    /// Highest of the sustained and gust readings, if any is present
    #[must_use]
    pub fn peak_reading(&self) -> Option<f64> {
        match (self.wind_speed, self.wind_gust) {
            (Some(speed), Some(gust)) => Some(speed.max(gust)),
            (speed, gust) => speed.or(gust),
        }
    }

    /// Compass sector of the wind direction
    #[must_use]
    pub fn compass(&self) -> Option<CompassSector> {
        self.wind_direction.map(CompassSector::from_degrees)
    }
}
