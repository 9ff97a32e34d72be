//! windwatch CLI
//!
//! Terminal forecast for the configured location and a status probe for a
//! running server.

#![allow(clippy::print_stdout)]

mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::{
    ForecastService,
    ports::{ClockPort, ForecastPort},
};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, OpenMeteoForecastAdapter, SystemClock};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// windwatch CLI
#[derive(Debug, Parser)]
#[command(name = "windwatch-cli")]
#[command(author, version, about = "Wind forecast highlights in the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the forecast for the configured location
    Forecast {
        /// Table rows to show (default: one page)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Configuration file (default: ./config.toml if present)
        #[arg(short, long, env = "WINDWATCH_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Check a running server's readiness
    Status {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load config")?,
    };
    config.validate()?;
    Ok(config)
}

async fn forecast(rows: Option<usize>, json: bool, config: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let request = config.forecast_request()?;
    let settings = config.analysis_settings()?;
    let visible_rows = rows.unwrap_or(settings.rows_per_page);

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let adapter: Arc<dyn ForecastPort> =
        Arc::new(OpenMeteoForecastAdapter::from_config(&config, Arc::clone(&clock))?);
    let service = ForecastService::new(adapter, clock).with_settings(settings);

    debug!(location = %request.label, visible_rows, "Building forecast report");
    let report = service.report(&request, visible_rows).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }
    Ok(())
}

async fn status(url: &str) -> anyhow::Result<()> {
    let response = reqwest::Client::new()
        .get(endpoint_url(url, "/ready"))
        .send()
        .await?;
    let ready = response.status().is_success();
    let body = response.json::<serde_json::Value>().await?;

    println!("📊 Server Status:");
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !ready {
        anyhow::bail!("server at {url} is not ready");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(cli.verbose)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Forecast { rows, json, config } => forecast(rows, json, config.as_ref()).await,
        Commands::Status { url } => status(&url).await,
    }
}
