//! Window selection over a series

use chrono::{DateTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::entities::{Observation, Series};

/// A start-inclusive, end-exclusive view into a [`Series`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    observations: &'a [Observation],
}

impl<'a> Window<'a> {
    /// A window over nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { observations: &[] }
    }

    /// The observations inside the window
    #[must_use]
    pub const fn observations(&self) -> &'a [Observation] {
        self.observations
    }

    /// Number of observations
    #[must_use]
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the window is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate over the observations
    pub fn iter(&self) -> std::slice::Iter<'a, Observation> {
        self.observations.iter()
    }

    /// Number of observations carrying a sustained speed reading
    #[must_use]
    pub fn speed_reading_count(&self) -> usize {
        self.iter().filter(|obs| obs.wind_speed.is_some()).count()
    }

    /// Timestamp of the first observation
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Tz>> {
        self.observations.first().map(|obs| obs.timestamp)
    }

    /// Timestamp of the last observation
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Tz>> {
        self.observations.last().map(|obs| obs.timestamp)
    }
}

impl<'a> From<&'a Series> for Window<'a> {
    fn from(series: &'a Series) -> Self {
        Self {
            observations: series.observations(),
        }
    }
}

impl<'a> IntoIterator for Window<'a> {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Select the observations with `now <= timestamp < now + duration`
///
/// Returns an empty window when nothing falls in range or `duration` is not
/// positive. The series ordering lets both bounds be found by binary search.
pub fn select<'a, Z: TimeZone>(
    series: &'a Series,
    now: &DateTime<Z>,
    duration: TimeDelta,
) -> Window<'a> {
    if duration <= TimeDelta::zero() {
        return Window::empty();
    }

    let observations = series.observations();
    let start = observations.partition_point(|obs| obs.timestamp < *now);
    let end = now.clone().checked_add_signed(duration).map_or(
        observations.len(),
        |end| observations.partition_point(|obs| obs.timestamp < end),
    );

    if start >= end {
        return Window::empty();
    }
    Window {
        observations: &observations[start..end],
    }
}

/// Truncate a timestamp to the start of its local hour
#[must_use]
pub fn floor_to_hour<Z: TimeZone>(timestamp: &DateTime<Z>) -> DateTime<Z> {
    timestamp
        .with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_minute(0))
        .unwrap_or_else(|| timestamp.clone())
}
