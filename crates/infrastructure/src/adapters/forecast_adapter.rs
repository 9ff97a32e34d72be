//! Forecast adapter - Implements `ForecastPort` using integration_weather
//!
//! Fetches every configured Open-Meteo model concurrently, converts each
//! response into a validated [`Series`] and fuses them hour by hour.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ClockPort, FetchedForecast, ForecastPort, ForecastRequest, SourceStatus},
};
use async_trait::async_trait;
use chrono_tz::Tz;
use domain::{Observation, Series, WeightedSeries, fuse_by_hour};
use futures::future::join_all;
use integration_weather::{
    HourlyForecast, HourlyQuery, OpenMeteoClient, WeatherClient, WeatherError,
};
use tracing::{debug, info, instrument, warn};

use crate::cache::ForecastCache;
use crate::config::{AppConfig, SourceConfig};

/// Default spread (km/h) above which fused hours are flagged
pub const DEFAULT_DIVERGENCE_THRESHOLD_KMH: f64 = 8.0;

/// Adapter producing fused hourly series from Open-Meteo models
pub struct OpenMeteoForecastAdapter {
    client: Arc<dyn WeatherClient>,
    sources: Vec<SourceConfig>,
    divergence_threshold: f64,
    cache: Option<Arc<ForecastCache>>,
}

impl std::fmt::Debug for OpenMeteoForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMeteoForecastAdapter")
            .field("client", &"<WeatherClient>")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            )
            .field("divergence_threshold", &self.divergence_threshold)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Outcome of fetching one source
struct SourceOutcome {
    status: SourceStatus,
    series: Option<WeightedSeries>,
    rate_limited: bool,
}

impl OpenMeteoForecastAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn WeatherClient>, sources: Vec<SourceConfig>) -> Self {
        Self {
            client,
            sources,
            divergence_threshold: DEFAULT_DIVERGENCE_THRESHOLD_KMH,
            cache: None,
        }
    }

    /// Build the adapter, HTTP client and cache described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(
        config: &AppConfig,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config.weather.client_config())
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        let cache = ForecastCache::with_ttl_minutes(config.weather.cache_ttl_minutes, clock);
        info!(
            sources = config.sources.len(),
            cache_ttl_minutes = config.weather.cache_ttl_minutes,
            "Forecast adapter configured"
        );
        Ok(Self::new(Arc::new(client), config.sources.clone())
            .with_divergence_threshold(config.analysis.divergence_threshold_kmh)
            .with_cache(Arc::new(cache)))
    }

    #[must_use]
    pub const fn with_divergence_threshold(mut self, threshold: f64) -> Self {
        self.divergence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ForecastCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn cache(&self) -> Option<&Arc<ForecastCache>> {
        self.cache.as_ref()
    }

    /// Convert integration errors to application errors
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            WeatherError::ParseError(e) | WeatherError::ServiceUnavailable(e) => {
                ApplicationError::Internal(e)
            },
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidOperation("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Convert one upstream forecast into a validated series in `timezone`
    fn to_series(forecast: HourlyForecast, timezone: Tz) -> Result<Series, ApplicationError> {
        let observations = forecast
            .points
            .into_iter()
            .map(|point| Observation {
                timestamp: point.time.with_timezone(&timezone),
                wind_speed: point.wind_speed,
                wind_gust: point.wind_gust,
                // Open-Meteo reports due north as 360
                wind_direction: point
                    .wind_direction
                    .map(|d| if (d - 360.0).abs() < f64::EPSILON { 0.0 } else { d }),
                temperature: point.temperature,
                precipitation: point.precipitation,
                precipitation_probability: point.precipitation_probability,
                high_divergence: false,
            })
            .collect();
        Series::new(observations).map_err(ApplicationError::from)
    }

    async fn fetch_source(&self, request: &ForecastRequest, source: &SourceConfig) -> SourceOutcome {
        let query = HourlyQuery::new(
            request.location.latitude(),
            request.location.longitude(),
            request.timezone.name(),
            request.forecast_days,
        )
        .with_model(source.model.clone());

        let result = self
            .client
            .get_hourly(&query)
            .await
            .map_err(Self::map_error)
            .and_then(|forecast| Self::to_series(forecast, request.timezone));

        match result {
            Ok(series) => {
                debug!(source = %source.id, points = series.len(), "Source fetched");
                SourceOutcome {
                    status: SourceStatus::ok(&source.id, &source.name),
                    series: Some(WeightedSeries::new(source.weight, series)),
                    rate_limited: false,
                }
            },
            Err(e) => {
                warn!(source = %source.id, error = %e, "Forecast source failed");
                SourceOutcome {
                    status: SourceStatus::failed(&source.id, &source.name, e.to_string()),
                    series: None,
                    rate_limited: matches!(e, ApplicationError::RateLimited),
                }
            },
        }
    }

    async fn fetch_uncached(
        &self,
        request: &ForecastRequest,
    ) -> Result<FetchedForecast, ApplicationError> {
        if self.sources.is_empty() {
            return Err(ApplicationError::Configuration(
                "no forecast sources configured".into(),
            ));
        }

        let outcomes = join_all(
            self.sources
                .iter()
                .map(|source| self.fetch_source(request, source)),
        )
        .await;

        let all_rate_limited = outcomes.iter().all(|o| o.rate_limited);
        let mut sources = Vec::with_capacity(outcomes.len());
        let mut weighted = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            sources.push(outcome.status);
            weighted.extend(outcome.series);
        }

        if weighted.is_empty() {
            if all_rate_limited {
                return Err(ApplicationError::RateLimited);
            }
            let reasons: Vec<String> = sources
                .iter()
                .map(|s| format!("{}: {}", s.id, s.error.as_deref().unwrap_or("unknown error")))
                .collect();
            return Err(ApplicationError::ExternalService(format!(
                "all forecast sources failed ({})",
                reasons.join("; ")
            )));
        }

        let series = fuse_by_hour(&weighted, self.divergence_threshold);
        Ok(FetchedForecast { series, sources })
    }
}

#[async_trait]
impl ForecastPort for OpenMeteoForecastAdapter {
    #[instrument(skip(self), fields(location = %request.label))]
    async fn fetch_series(
        &self,
        request: &ForecastRequest,
    ) -> Result<FetchedForecast, ApplicationError> {
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(request)) {
            return Ok(cached);
        }

        let fetched = self.fetch_uncached(request).await?;
        if let Some(cache) = &self.cache {
            cache.insert(request, fetched.clone());
        }
        Ok(fetched)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
