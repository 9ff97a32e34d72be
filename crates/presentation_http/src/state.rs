//! Application state shared across handlers

use std::sync::Arc;

use application::{ForecastService, HealthService, ports::ForecastRequest};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report pipeline over the configured forecast source
    pub forecast_service: Arc<ForecastService>,
    /// Readiness probe of the forecast source
    pub health_service: Arc<HealthService>,
    /// The configured location
    pub request: Arc<ForecastRequest>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("location", &self.request.label)
            .finish_non_exhaustive()
    }
}
