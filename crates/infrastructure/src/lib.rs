//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: configuration loading,
//! tracing setup, clocks, the forecast cache and the Open-Meteo adapter.

pub mod adapters;
pub mod cache;
pub mod clock;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use cache::{CacheStats, ForecastCache};
pub use clock::{FixedClock, SystemClock};
pub use config::{
    AnalysisConfig, AppConfig, LocationConfig, ServerConfig, SourceConfig, WeatherConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
