//! Forecast report service
//!
//! Fetches the hourly series through the [`ForecastPort`] and derives the
//! summary cards, highlighted events, chart labels and paginated table.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use domain::analysis::{
    AxisLabel, DetectionThresholds, Summary, WindEvent, Window, detect_events, floor_to_hour,
    merge_labels, regular_ticks, select, summarize_with_threshold,
};
use serde::Serialize;
use tracing::{debug, instrument};

use super::forecast_table::{ROWS_PER_PAGE, TablePage, paginate, table_rows};
use crate::error::ApplicationError;
use crate::ports::{ClockPort, FetchedForecast, ForecastPort, ForecastRequest, SourceStatus};

/// Format of the "last updated" header label
pub const UPDATED_AT_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Minimum speed readings in the summary window for a trustworthy average
pub const MIN_POINTS_FOR_AVERAGE: usize = 8;

/// Tunable parameters of the report pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub thresholds: DetectionThresholds,
    pub tick_interval: TimeDelta,
    pub summary_window: TimeDelta,
    pub chart_window: TimeDelta,
    pub min_points_for_average: usize,
    pub rows_per_page: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            thresholds: DetectionThresholds::default(),
            tick_interval: TimeDelta::hours(3),
            summary_window: TimeDelta::hours(24),
            chart_window: TimeDelta::hours(72),
            min_points_for_average: MIN_POINTS_FOR_AVERAGE,
            rows_per_page: ROWS_PER_PAGE,
        }
    }
}

/// Whether the summary window held enough readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    Ok,
    InsufficientData,
}

/// Report heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub location_name: String,
    pub timezone: String,
    #[serde(serialize_with = "domain::serde_time::rfc3339")]
    pub generated_at: DateTime<Tz>,
    /// `dd/mm/YYYY, HH:MM` in the location's zone
    pub updated_at: String,
}

/// Everything the presentation layers render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub header: ReportHeader,
    pub summary: Summary,
    pub data_status: DataStatus,
    pub events: Vec<WindEvent>,
    pub labels: Vec<AxisLabel>,
    pub table: TablePage,
    pub sources: Vec<SourceStatus>,
}

/// Derive a report from an already fetched forecast
///
/// Pure: `now` and all settings are explicit.
pub fn build_report(
    request: &ForecastRequest,
    fetched: &FetchedForecast,
    now: &DateTime<Tz>,
    settings: &AnalysisSettings,
    visible_rows: usize,
) -> ForecastReport {
    let series = &fetched.series;

    let summary_window = select(series, now, settings.summary_window);
    let summary =
        summarize_with_threshold(summary_window, settings.thresholds.calm_threshold());
    let data_status = if summary_window.speed_reading_count() >= settings.min_points_for_average {
        DataStatus::Ok
    } else {
        DataStatus::InsufficientData
    };

    let chart_window = select(series, now, settings.chart_window);
    let events = detect_events(chart_window, &settings.thresholds);
    let labels = merge_labels(&chart_ticks(chart_window, settings.tick_interval), &events);

    let table = paginate(
        table_rows(series, &floor_to_hour(now)),
        visible_rows,
        settings.rows_per_page,
    );

    ForecastReport {
        header: ReportHeader {
            location_name: request.label.clone(),
            timezone: request.timezone.name().to_string(),
            generated_at: *now,
            updated_at: now.format(UPDATED_AT_FORMAT).to_string(),
        },
        summary,
        data_status,
        events,
        labels,
        table,
        sources: fetched.sources.clone(),
    }
}

fn chart_ticks(window: Window<'_>, interval: TimeDelta) -> Vec<DateTime<Tz>> {
    match (window.start(), window.end()) {
        (Some(start), Some(end)) => regular_ticks(&start, &end, interval),
        _ => Vec::new(),
    }
}

/// Service producing forecast reports
pub struct ForecastService {
    forecast: Arc<dyn ForecastPort>,
    clock: Arc<dyn ClockPort>,
    settings: AnalysisSettings,
}

impl std::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService")
            .field("forecast", &"<ForecastPort>")
            .field("clock", &"<ClockPort>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ForecastService {
    /// Create a service with default analysis settings
    #[must_use]
    pub fn new(forecast: Arc<dyn ForecastPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            forecast,
            clock,
            settings: AnalysisSettings::default(),
        }
    }

    /// Replace the analysis settings
    #[must_use]
    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Fetch and analyse the forecast as of the injected clock's now
    #[instrument(skip(self), fields(location = %request.label))]
    pub async fn report(
        &self,
        request: &ForecastRequest,
        visible_rows: usize,
    ) -> Result<ForecastReport, ApplicationError> {
        let now = self.clock.now().with_timezone(&request.timezone);
        self.report_at(request, &now, visible_rows).await
    }

    /// Fetch and analyse the forecast as of `now`
    pub async fn report_at(
        &self,
        request: &ForecastRequest,
        now: &DateTime<Tz>,
        visible_rows: usize,
    ) -> Result<ForecastReport, ApplicationError> {
        let fetched = self.forecast.fetch_series(request).await?;
        debug!(
            observations = fetched.series.len(),
            sources = fetched.sources.len(),
            "Fetched forecast series"
        );
        Ok(build_report(
            request,
            &fetched,
            now,
            &self.settings,
            visible_rows,
        ))
    }

    /// Whether the forecast source can currently be reached
    pub async fn is_available(&self) -> bool {
        self.forecast.is_available().await
    }
}
