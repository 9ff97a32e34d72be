//! Readiness checks for the forecast source
//!
//! Wraps [`ForecastPort::is_available`] with a timeout and reports the
//! response time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{ClockPort, ForecastPort};

/// Default timeout for a readiness probe in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Status of the forecast source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub const fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>, response_time_ms: Option<u64>) -> Self {
        Self {
            healthy: false,
            response_time_ms,
            error: Some(error.into()),
        }
    }
}

/// Readiness probe result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub forecast: ServiceHealth,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.forecast.healthy
    }
}

/// Service checking whether forecasts can currently be produced
pub struct HealthService {
    forecast: Arc<dyn ForecastPort>,
    clock: Arc<dyn ClockPort>,
    timeout: Duration,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("forecast", &"<ForecastPort>")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    #[must_use]
    pub fn new(forecast: Arc<dyn ForecastPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            forecast,
            clock,
            timeout: Duration::from_secs(DEFAULT_HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe the forecast source
    #[instrument(skip(self))]
    pub async fn check(&self) -> HealthReport {
        let start = Instant::now();
        let result = timeout(self.timeout, self.forecast.is_available()).await;
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let forecast = match result {
            Ok(true) => {
                debug!(response_time_ms = elapsed_ms, "Forecast source healthy");
                ServiceHealth::healthy(elapsed_ms)
            },
            Ok(false) => {
                warn!(response_time_ms = elapsed_ms, "Forecast source unavailable");
                ServiceHealth::unhealthy("Forecast source unavailable", Some(elapsed_ms))
            },
            Err(_) => {
                warn!("Forecast health check timed out");
                ServiceHealth::unhealthy("Health check timed out", None)
            },
        };

        HealthReport {
            forecast,
            checked_at: self.clock.now(),
        }
    }
}
