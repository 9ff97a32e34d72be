//! Integration tests for the hourly forecast client using wiremock
//!
//! These tests verify the weather client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use integration_weather::{HourlyQuery, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample Open-Meteo hourly response for Osório (UTC-3)
fn sample_hourly_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": -29.875,
        "longitude": -50.25,
        "generationtime_ms": 0.2,
        "utc_offset_seconds": -10800,
        "timezone": "America/Sao_Paulo",
        "timezone_abbreviation": "GMT-3",
        "elevation": 16.0,
        "hourly_units": {
            "time": "iso8601",
            "wind_speed_10m": "km/h",
            "wind_gusts_10m": "km/h",
            "wind_direction_10m": "°",
            "temperature_2m": "°C",
            "precipitation": "mm",
            "precipitation_probability": "%"
        },
        "hourly": {
            "time": ["2026-10-14T00:00", "2026-10-14T01:00", "2026-10-14T02:00"],
            "wind_speed_10m": [10.2, 12.5, null],
            "wind_gusts_10m": [18.0, 24.1, 30.0],
            "wind_direction_10m": [90, 360, 135],
            "temperature_2m": [17.1, 16.8, 16.5],
            "precipitation": [0.0, 0.0, 0.2],
            "precipitation_probability": [5, 10, 40]
        }
    })
}

fn query() -> HourlyQuery {
    HourlyQuery::new(-29.8889, -50.2667, "America/Sao_Paulo", 3)
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    OpenMeteoClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /forecast endpoint with the given response
async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_hourly_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_hourly_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let forecast = result.unwrap();
    assert_eq!(forecast.timezone, "America/Sao_Paulo");
    assert_eq!(forecast.points.len(), 3);
    assert_eq!(
        forecast.points[0].time.to_rfc3339(),
        "2026-10-14T03:00:00+00:00"
    );
    assert_eq!(forecast.points[0].wind_speed, Some(10.2));
    assert_eq!(forecast.points[1].wind_direction, Some(360.0));
    assert!(forecast.points[2].wind_speed.is_none());
    assert_eq!(forecast.points[2].precipitation_probability, Some(40.0));
}

#[tokio::test]
async fn test_request_carries_hourly_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "-29.8889"))
        .and(query_param("longitude", "-50.2667"))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .and(query_param("forecast_days", "3"))
        .and(query_param("wind_speed_unit", "kmh"))
        .and(query_param("models", "ecmwf_ifs025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_hourly_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .get_hourly(&query().with_model(Some("ecmwf_ifs025".into())))
        .await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_knots_response_is_converted() {
    let mock_server = MockServer::start().await;
    let mut body = sample_hourly_response();
    body["hourly_units"]["wind_speed_10m"] = serde_json::json!("kn");
    body["hourly_units"]["wind_gusts_10m"] = serde_json::json!("kn");

    setup_forecast_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_hourly(&query()).await.unwrap();
    let speed = forecast.points[0].wind_speed.unwrap();
    assert!((speed - 10.2 * 1.852).abs() < 1e-9);
}

#[tokio::test]
async fn test_health_check_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_hourly_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_healthy().await, "Expected health check to succeed");
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(429).set_body_string("Rate limit exceeded"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(
        matches!(result, Err(WeatherError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_client_error_returns_request_failed() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Cannot initialize WeatherVariable from invalid String value"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(
        matches!(result, Err(WeatherError::RequestFailed(_))),
        "Expected RequestFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_hourly_block_is_parse_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": -29.875,
            "longitude": -50.25,
            "utc_offset_seconds": -10800,
            "timezone": "America/Sao_Paulo"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&query()).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_health_check_fails_on_server_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_healthy().await, "Expected health check to fail");
}

// ============================================================================
// Input validation scenarios
// ============================================================================

#[tokio::test]
async fn test_invalid_coordinates_rejected_before_request() {
    let mock_server = MockServer::start().await;

    // No mock mounted - validation must fail before any request
    let client = create_test_client(&mock_server);
    let result = client
        .get_hourly(&HourlyQuery::new(91.0, -50.2667, "auto", 3))
        .await;

    assert!(
        matches!(result, Err(WeatherError::InvalidCoordinates)),
        "Expected InvalidCoordinates, got: {result:?}"
    );
}
