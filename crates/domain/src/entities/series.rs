//! Validated, time-ordered forecast series

use chrono_tz::Tz;
use serde::Serialize;

use super::Observation;
use crate::errors::DomainError;

/// An ordered sequence of observations, strictly increasing by timestamp
///
/// Built once per fetch cycle and never mutated afterwards; analysis only
/// derives views from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Create a validated series
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeries` when timestamps are not strictly
    /// increasing, a speed or gust is negative or non-finite, or a direction
    /// lies outside `[0, 360)`.
    pub fn new(observations: Vec<Observation>) -> Result<Self, DomainError> {
        for (index, obs) in observations.iter().enumerate() {
            Self::validate_observation(index, obs)?;
            if index > 0 && observations[index - 1].timestamp >= obs.timestamp {
                return Err(DomainError::invalid_series(
                    index,
                    "timestamps must be strictly increasing",
                ));
            }
        }
        Ok(Self { observations })
    }

    /// An empty series
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    /// Wrap observations already known to satisfy the invariants
    pub(crate) const fn from_validated(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    fn validate_observation(index: usize, obs: &Observation) -> Result<(), DomainError> {
        let speed_like = [("wind speed", obs.wind_speed), ("wind gust", obs.wind_gust)];
        for (name, value) in speed_like {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(DomainError::invalid_series(
                        index,
                        format!("{name} is not finite"),
                    ));
                }
                if v < 0.0 {
                    return Err(DomainError::invalid_series(
                        index,
                        format!("{name} must be >= 0, got {v}"),
                    ));
                }
            }
        }
        if let Some(direction) = obs.wind_direction {
            if !(0.0..360.0).contains(&direction) {
                return Err(DomainError::invalid_series(
                    index,
                    format!("wind direction must be in [0, 360), got {direction}"),
                ));
            }
        }
        Ok(())
    }

    /// All observations in timestamp order
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate over observations in order
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// First observation
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    /// Last observation
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Timezone of the series (taken from the first observation)
    #[must_use]
    pub fn timezone(&self) -> Option<Tz> {
        self.first().map(|obs| obs.timestamp.timezone())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
