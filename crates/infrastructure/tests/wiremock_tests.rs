//! Integration tests for the forecast adapter
//!
//! Tests cover:
//! - Multi-source fetch and fusion against a mocked Open-Meteo server
//! - Partial and total source failures
//! - Cache expiry driven by a fixed clock

use std::sync::Arc;

use application::{
    ApplicationError,
    ports::{ClockPort, ForecastPort, ForecastRequest},
};
use chrono::{TimeDelta, TimeZone, Utc};
use domain::value_objects::GeoLocation;
use infrastructure::{
    AppConfig, FixedClock, ForecastCache, OpenMeteoForecastAdapter, SourceConfig,
};
use integration_weather::{OpenMeteoClient, WeatherConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hourly_body(speeds: [f64; 3]) -> serde_json::Value {
    serde_json::json!({
        "latitude": -29.875,
        "longitude": -50.25,
        "utc_offset_seconds": -10800,
        "timezone": "America/Sao_Paulo",
        "hourly_units": { "wind_speed_10m": "km/h" },
        "hourly": {
            "time": ["2026-10-14T00:00", "2026-10-14T01:00", "2026-10-14T02:00"],
            "wind_speed_10m": speeds,
            "wind_gusts_10m": [18.0, 24.1, 30.0],
            "wind_direction_10m": [90, 360, 135],
            "temperature_2m": [17.1, 16.8, 16.5],
            "precipitation": [0.0, 0.0, 0.2],
            "precipitation_probability": [5, 10, 40]
        }
    })
}

fn request() -> ForecastRequest {
    ForecastRequest::new(
        "Osório, RS",
        GeoLocation::osorio(),
        chrono_tz::America::Sao_Paulo,
        3,
    )
}

fn source(id: &str, model: &str, weight: f64) -> SourceConfig {
    SourceConfig {
        id: id.to_string(),
        name: id.to_uppercase(),
        model: Some(model.to_string()),
        weight,
    }
}

fn adapter(server: &MockServer, sources: Vec<SourceConfig>) -> OpenMeteoForecastAdapter {
    let client = OpenMeteoClient::new(WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap();
    OpenMeteoForecastAdapter::new(Arc::new(client), sources)
}

async fn mount_model(server: &MockServer, model: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("models", model))
        .respond_with(response)
        .mount(server)
        .await;
}

mod fusion_tests {
    use super::*;

    #[tokio::test]
    async fn two_models_are_fused_per_hour() {
        let server = MockServer::start().await;
        mount_model(
            &server,
            "ecmwf_ifs025",
            ResponseTemplate::new(200).set_body_json(hourly_body([10.0, 12.0, 20.0])),
        )
        .await;
        mount_model(
            &server,
            "gfs_seamless",
            ResponseTemplate::new(200).set_body_json(hourly_body([14.0, 12.0, 40.0])),
        )
        .await;

        let adapter = adapter(
            &server,
            vec![
                source("ecmwf", "ecmwf_ifs025", 1.0),
                source("gfs", "gfs_seamless", 1.0),
            ],
        );
        let fetched = adapter.fetch_series(&request()).await.unwrap();

        assert_eq!(fetched.series.len(), 3);
        let observations = fetched.series.observations();
        assert_eq!(observations[0].wind_speed, Some(12.0));
        assert!(!observations[0].high_divergence);
        assert_eq!(observations[2].wind_speed, Some(30.0));
        assert!(observations[2].high_divergence);
        assert_eq!(observations[1].wind_direction, Some(0.0));
        assert_eq!(
            observations[0].timestamp.to_rfc3339(),
            "2026-10-14T00:00:00-03:00"
        );
        assert!(fetched.sources.iter().all(|s| s.is_ok()));
    }

    #[tokio::test]
    async fn failed_model_is_reported_but_not_fatal() {
        let server = MockServer::start().await;
        mount_model(
            &server,
            "ecmwf_ifs025",
            ResponseTemplate::new(200).set_body_json(hourly_body([10.0, 12.0, 20.0])),
        )
        .await;
        mount_model(
            &server,
            "gfs_seamless",
            ResponseTemplate::new(503).set_body_string("Service Unavailable"),
        )
        .await;

        let adapter = adapter(
            &server,
            vec![
                source("ecmwf", "ecmwf_ifs025", 1.0),
                source("gfs", "gfs_seamless", 1.0),
            ],
        );
        let fetched = adapter.fetch_series(&request()).await.unwrap();

        assert_eq!(fetched.series.len(), 3);
        assert_eq!(fetched.series.observations()[2].wind_speed, Some(20.0));
        let gfs = &fetched.sources[1];
        assert_eq!(gfs.id, "gfs");
        assert!(!gfs.is_ok());
        assert!(gfs.error.is_some());
    }

    #[tokio::test]
    async fn every_model_failing_is_an_error() {
        let server = MockServer::start().await;
        mount_model(
            &server,
            "ecmwf_ifs025",
            ResponseTemplate::new(500).set_body_string("boom"),
        )
        .await;

        let adapter = adapter(&server, vec![source("ecmwf", "ecmwf_ifs025", 1.0)]);
        let result = adapter.fetch_series(&request()).await;

        assert!(
            matches!(result, Err(ApplicationError::ExternalService(_))),
            "Expected ExternalService, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn rate_limited_everywhere_is_rate_limited() {
        let server = MockServer::start().await;
        mount_model(
            &server,
            "ecmwf_ifs025",
            ResponseTemplate::new(429).set_body_string("Too many requests"),
        )
        .await;

        let adapter = adapter(&server, vec![source("ecmwf", "ecmwf_ifs025", 1.0)]);
        let result = adapter.fetch_series(&request()).await;

        assert!(matches!(result, Err(ApplicationError::RateLimited)));
    }
}

mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn cached_forecast_avoids_second_request_until_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body([10.0, 12.0, 20.0])))
            .expect(2)
            .mount(&server)
            .await;

        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 14, 3, 0, 0).unwrap(),
        ));
        let cache = Arc::new(ForecastCache::with_ttl_minutes(
            30,
            Arc::clone(&clock) as Arc<dyn ClockPort>,
        ));
        let adapter = adapter(&server, vec![SourceConfig::best_match()])
            .with_cache(Arc::clone(&cache));

        adapter.fetch_series(&request()).await.unwrap();
        clock.advance(TimeDelta::minutes(10));
        adapter.fetch_series(&request()).await.unwrap();
        clock.advance(TimeDelta::minutes(25));
        adapter.fetch_series(&request()).await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        // MockServer verifies the expected request count on drop
    }

    #[tokio::test]
    async fn from_config_uses_configured_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body([10.0, 12.0, 20.0])))
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.weather.base_url = server.uri();
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 14, 3, 0, 0).unwrap(),
        ));

        let adapter = OpenMeteoForecastAdapter::from_config(&config, clock).unwrap();
        let request = config.forecast_request().unwrap();
        let fetched = adapter.fetch_series(&request).await.unwrap();

        assert_eq!(fetched.series.len(), 3);
        assert!(adapter.cache().is_some());
        assert!(adapter.is_available().await);
    }
}
