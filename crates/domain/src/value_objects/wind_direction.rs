//! Compass sector lookup for wind direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize an angle in degrees into `[0, 360)`
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// One of the eight 45° compass sectors a wind blows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassSector {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassSector {
    /// All sectors clockwise from North
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Map a meteorological direction (degrees the wind blows from) to its sector
    ///
    /// Sectors are centred on the cardinal and intercardinal points, so North
    /// covers `[337.5, 22.5)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        let shifted = normalize_degrees(degrees + 22.5);
        let index = ((shifted / 45.0).floor() as usize).min(7);
        Self::ALL[index]
    }

    /// Two-letter compass abbreviation
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    /// Full sector name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "Northeast",
            Self::East => "East",
            Self::SouthEast => "Southeast",
            Self::South => "South",
            Self::SouthWest => "Southwest",
            Self::West => "West",
            Self::NorthWest => "Northwest",
        }
    }

    /// Plain-language description for the coastal reference site
    ///
    /// The ocean lies to the east of the site and the lagoon system to the
    /// south, so the wording tells where the air is coming from.
    #[must_use]
    pub const fn coastal_description(&self) -> &'static str {
        match self {
            Self::North | Self::West | Self::NorthWest => "land wind from the continent",
            Self::NorthEast | Self::South => "ocean-quadrant wind",
            Self::East | Self::SouthEast | Self::SouthWest => {
                "sea wind blowing onto the continent"
            },
        }
    }

    /// `"<name> – <description>"`, as shown in the hourly table
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} – {}", self.name(), self.coastal_description())
    }
}

impl fmt::Display for CompassSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
