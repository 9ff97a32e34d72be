//! Strong-wind and calm event detection

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use super::Window;
use crate::entities::Observation;
use crate::errors::DomainError;

/// Classification of a notable forecast hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Sustained speed or gust at or above the strong threshold
    Strong,
    /// Sustained speed below the calm threshold
    Calm,
}

impl EventKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong wind",
            Self::Calm => "calm",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A notable forecast hour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindEvent {
    #[serde(serialize_with = "crate::serde_time::rfc3339")]
    pub timestamp: DateTime<Tz>,
    pub kind: EventKind,
    /// Speed that triggered the event: `max(speed, gust)` for strong hours,
    /// the sustained speed for calm ones
    pub severity: f64,
    pub speed: Option<f64>,
    pub gust: Option<f64>,
    /// Distance past the threshold on a shared `[0, 1]` scale, higher is more extreme
    pub notability: f64,
}

impl WindEvent {
    /// Ranking order: most notable first, earliest first among equals
    fn rank(&self, other: &Self) -> Ordering {
        other
            .notability
            .total_cmp(&self.notability)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}

/// Thresholds and limits for event detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    strong_threshold: f64,
    calm_threshold: f64,
    max_events: usize,
}

impl DetectionThresholds {
    /// Default strong threshold (km/h)
    pub const DEFAULT_STRONG: f64 = 20.0;
    /// Default calm threshold (km/h)
    pub const DEFAULT_CALM: f64 = 3.0;
    /// Default number of events retained
    pub const DEFAULT_MAX_EVENTS: usize = 10;
    /// Multiple of the strong threshold at which strong notability reaches 1
    pub const STRONG_SATURATION: f64 = 2.0;

    /// Create validated thresholds
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidThresholds` if the strong threshold is not
    /// a positive finite number, or the calm threshold is negative or non-finite.
    pub fn new(
        strong_threshold: f64,
        calm_threshold: f64,
        max_events: usize,
    ) -> Result<Self, DomainError> {
        if !strong_threshold.is_finite() || strong_threshold <= 0.0 {
            return Err(DomainError::InvalidThresholds(format!(
                "strong threshold must be positive, got {strong_threshold}"
            )));
        }
        if !calm_threshold.is_finite() || calm_threshold < 0.0 {
            return Err(DomainError::InvalidThresholds(format!(
                "calm threshold must be >= 0, got {calm_threshold}"
            )));
        }
        Ok(Self {
            strong_threshold,
            calm_threshold,
            max_events,
        })
    }

    #[must_use]
    pub const fn strong_threshold(&self) -> f64 {
        self.strong_threshold
    }

    #[must_use]
    pub const fn calm_threshold(&self) -> f64 {
        self.calm_threshold
    }

    #[must_use]
    pub const fn max_events(&self) -> usize {
        self.max_events
    }

    /// Linear from 0 at the threshold to 1 at `STRONG_SATURATION` times it
    fn strong_notability(&self, peak: f64) -> f64 {
        let span = self.strong_threshold * (Self::STRONG_SATURATION - 1.0);
        ((peak - self.strong_threshold) / span).min(1.0)
    }

    fn classify(&self, obs: &Observation) -> Option<WindEvent> {
        let strong = obs
            .peak_reading()
            .filter(|&peak| peak >= self.strong_threshold);

        // Strong is checked first: an hour matching both keeps only Strong
        let (kind, severity, notability) = if let Some(peak) = strong {
            (EventKind::Strong, peak, self.strong_notability(peak))
        } else {
            let speed = obs.wind_speed.filter(|&s| s < self.calm_threshold)?;
            (EventKind::Calm, speed, 1.0 - speed / self.calm_threshold)
        };

        Some(WindEvent {
            timestamp: obs.timestamp,
            kind,
            severity,
            speed: obs.wind_speed,
            gust: obs.wind_gust,
            notability,
        })
    }
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            strong_threshold: Self::DEFAULT_STRONG,
            calm_threshold: Self::DEFAULT_CALM,
            max_events: Self::DEFAULT_MAX_EVENTS,
        }
    }
}

/// Find the most notable strong and calm hours of a window
///
/// Strong and calm candidates are ranked together by notability, so a
/// near-zero calm can outrank a gust only just above the strong threshold.
/// At most `max_events` events are returned, ordered most notable first.
pub fn detect_events(window: Window<'_>, thresholds: &DetectionThresholds) -> Vec<WindEvent> {
    let mut events: Vec<WindEvent> = window
        .iter()
        .filter_map(|obs| thresholds.classify(obs))
        .collect();
    events.sort_by(WindEvent::rank);
    events.truncate(thresholds.max_events);
    events
}
