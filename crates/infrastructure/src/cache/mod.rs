//! Caching for fetched forecasts

mod forecast_cache;

pub use forecast_cache::{CacheStats, DEFAULT_TTL_MINUTES, ForecastCache};
