//! Analysis thresholds and windows.

use serde::{Deserialize, Serialize};

/// Parameters of the summary, event and chart pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Speed or gust (km/h) at which an hour counts as strong
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold_kmh: f64,

    /// Sustained speed (km/h) below which an hour counts as calm
    #[serde(default = "default_calm_threshold")]
    pub calm_threshold_kmh: f64,

    /// Maximum number of highlighted events
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Hours between regular chart ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_hours: u32,

    /// Length of the summary window in hours
    #[serde(default = "default_summary_window")]
    pub summary_window_hours: u32,

    /// Length of the chart window in hours
    #[serde(default = "default_chart_window")]
    pub chart_window_hours: u32,

    /// Speed readings needed in the summary window for a reliable average
    #[serde(default = "default_min_points")]
    pub min_points_for_average: usize,

    /// Source spread (km/h) above which an hour is flagged as divergent
    #[serde(default = "default_divergence")]
    pub divergence_threshold_kmh: f64,

    /// Table rows revealed per step
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

const fn default_strong_threshold() -> f64 {
    20.0
}

const fn default_calm_threshold() -> f64 {
    3.0
}

const fn default_max_events() -> usize {
    10
}

const fn default_tick_interval() -> u32 {
    3
}

const fn default_summary_window() -> u32 {
    24
}

const fn default_chart_window() -> u32 {
    72
}

const fn default_min_points() -> usize {
    8
}

const fn default_divergence() -> f64 {
    8.0
}

const fn default_rows_per_page() -> usize {
    8
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strong_threshold_kmh: default_strong_threshold(),
            calm_threshold_kmh: default_calm_threshold(),
            max_events: default_max_events(),
            tick_interval_hours: default_tick_interval(),
            summary_window_hours: default_summary_window(),
            chart_window_hours: default_chart_window(),
            min_points_for_average: default_min_points(),
            divergence_threshold_kmh: default_divergence(),
            rows_per_page: default_rows_per_page(),
        }
    }
}
