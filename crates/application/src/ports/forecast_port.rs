//! Forecast source port
//!
//! Defines the interface for retrieving an hourly wind series.

use async_trait::async_trait;
use chrono_tz::Tz;
use domain::entities::Series;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// What to fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    /// Display name of the location
    pub label: String,
    pub location: GeoLocation,
    /// Zone the series timestamps are expressed in
    pub timezone: Tz,
    /// Number of forecast days (1-16)
    pub forecast_days: u8,
}

impl ForecastRequest {
    #[must_use]
    pub fn new(label: impl Into<String>, location: GeoLocation, timezone: Tz, forecast_days: u8) -> Self {
        Self {
            label: label.into(),
            location,
            timezone,
            forecast_days,
        }
    }

    /// Key identifying the fetch parameters, independent of the display label
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "{:.4}:{:.4}:{}:{}",
            self.location.latitude(),
            self.location.longitude(),
            self.timezone.name(),
            self.forecast_days
        )
    }
}

/// Outcome of fetching from one configured source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Ok,
    Failed,
}

/// Status of a configured source for the last fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    pub id: String,
    pub name: String,
    pub state: SourceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceStatus {
    /// A source that answered
    #[must_use]
    pub fn ok(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: SourceState::Ok,
            error: None,
        }
    }

    /// A source that failed and was left out of the series
    #[must_use]
    pub fn failed(id: impl Into<String>, name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: SourceState::Failed,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.state == SourceState::Ok
    }
}

/// A fused series together with the per-source outcome
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedForecast {
    pub series: Series,
    pub sources: Vec<SourceStatus>,
}

/// Port for hourly forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch the hourly series for a location
    ///
    /// Fails only when no configured source produced data.
    async fn fetch_series(&self, request: &ForecastRequest) -> Result<FetchedForecast, ApplicationError>;

    /// Check if at least one source is reachable
    async fn is_available(&self) -> bool;
}
