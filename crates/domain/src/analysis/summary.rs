//! Rolling-window summary statistics

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use super::Window;

/// Sustained speed (km/h) below which a window counts as calm
pub const CALM_THRESHOLD_KMH: f64 = 3.0;

/// Summary statistics of a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Mean sustained speed over readings present in the window
    pub mean_speed: f64,
    /// Highest gust in the window, `0` when no gust reading exists
    pub peak_gust: f64,
    /// Time of the earliest observation reaching `peak_gust`
    #[serde(serialize_with = "crate::serde_time::rfc3339_opt")]
    pub peak_time: Option<DateTime<Tz>>,
    /// The lowest sustained speed is below the calm threshold
    pub is_calm: bool,
}

impl Summary {
    /// The summary reported for a window with no data: zeroed and calm
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            mean_speed: 0.0,
            peak_gust: 0.0,
            peak_time: None,
            is_calm: true,
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Summarize a window with the standard calm threshold
pub fn summarize(window: Window<'_>) -> Summary {
    summarize_with_threshold(window, CALM_THRESHOLD_KMH)
}

/// Summarize a window, treating minimum speeds below `calm_threshold` as calm
///
/// Missing readings are left out of every statistic. A window without any
/// sustained speed reading is calm, the same as an empty window.
pub fn summarize_with_threshold(window: Window<'_>, calm_threshold: f64) -> Summary {
    if window.is_empty() {
        return Summary::empty();
    }

    let mut speed_sum = 0.0;
    let mut speed_count = 0_usize;
    let mut min_speed: Option<f64> = None;
    let mut peak: Option<(f64, DateTime<Tz>)> = None;

    for obs in window {
        if let Some(speed) = obs.wind_speed {
            speed_sum += speed;
            speed_count += 1;
            min_speed = Some(min_speed.map_or(speed, |m| m.min(speed)));
        }
        if let Some(gust) = obs.wind_gust {
            // strictly greater: the first observation reaching the max keeps it
            if peak.is_none_or(|(best, _)| gust > best) {
                peak = Some((gust, obs.timestamp));
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_speed = if speed_count == 0 {
        0.0
    } else {
        speed_sum / speed_count as f64
    };

    Summary {
        mean_speed,
        peak_gust: peak.map_or(0.0, |(gust, _)| gust),
        peak_time: peak.map(|(_, time)| time),
        is_calm: min_speed.is_none_or(|min| min < calm_threshold),
    }
}
