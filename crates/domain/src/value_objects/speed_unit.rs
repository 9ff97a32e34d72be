//! Wind speed unit value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a wind speed reading was reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Kilometres per hour (canonical unit of the series)
    #[default]
    Kmh,
    /// Nautical miles per hour
    Knots,
    /// Metres per second
    MetersPerSecond,
}

impl SpeedUnit {
    const KNOTS_TO_KMH: f64 = 1.852;
    const MS_TO_KMH: f64 = 3.6;

    /// Convert a value in this unit to km/h
    #[must_use]
    pub fn to_kmh(self, value: f64) -> f64 {
        match self {
            Self::Kmh => value,
            Self::Knots => value * Self::KNOTS_TO_KMH,
            Self::MetersPerSecond => value * Self::MS_TO_KMH,
        }
    }

    /// Open-Meteo `wind_speed_unit` query value
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Kmh => "kmh",
            Self::Knots => "kn",
            Self::MetersPerSecond => "ms",
        }
    }

    /// Short display symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Knots => "kn",
            Self::MetersPerSecond => "m/s",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for SpeedUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kmh" | "km/h" => Ok(Self::Kmh),
            "kn" | "knots" => Ok(Self::Knots),
            "ms" | "m/s" => Ok(Self::MetersPerSecond),
            _ => Err(format!("Invalid speed unit: {s}. Use 'kmh', 'knots' or 'ms'")),
        }
    }
}
