//! Adapters implementing application ports

mod forecast_adapter;

pub use forecast_adapter::OpenMeteoForecastAdapter;
