//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Provides hourly wind forecasts without requiring an API key.

pub mod client;
mod models;

pub use client::{HourlyQuery, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{HourlyForecast, HourlyPoint};
