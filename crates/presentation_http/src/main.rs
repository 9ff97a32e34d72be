//! windwatch HTTP server

use std::{sync::Arc, time::Duration};

use application::{
    ForecastService, HealthService,
    ports::{ClockPort, ForecastPort},
};
use infrastructure::{AppConfig, LogFormat, OpenMeteoForecastAdapter, SystemClock, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const DEFAULT_LOG_FILTER: &str = "windwatch_server=debug,presentation_http=debug,\
                                  infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let format = config.server.log_format.parse().unwrap_or(LogFormat::Text);
    init_tracing(format, DEFAULT_LOG_FILTER)?;

    info!("🌬️ windwatch v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    config.validate()?;
    let request = config.forecast_request()?;
    let settings = config.analysis_settings()?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        location = %request.label,
        timezone = %request.timezone,
        sources = config.sources.len(),
        "Configuration loaded"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let forecast: Arc<dyn ForecastPort> =
        Arc::new(OpenMeteoForecastAdapter::from_config(&config, Arc::clone(&clock))?);

    let forecast_service =
        ForecastService::new(Arc::clone(&forecast), Arc::clone(&clock)).with_settings(settings);
    let health_service = HealthService::new(forecast, Arc::clone(&clock));

    let state = AppState {
        forecast_service: Arc::new(forecast_service),
        health_service: Arc::new(health_service),
        request: Arc::new(request),
    };

    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
