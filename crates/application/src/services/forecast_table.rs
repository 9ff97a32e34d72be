//! Hour-by-hour forecast table with incremental pagination

use chrono::DateTime;
use chrono_tz::Tz;
use domain::entities::{Observation, Series};
use serde::Serialize;

/// Rows revealed per "show more" step
pub const ROWS_PER_PAGE: usize = 8;

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(serialize_with = "domain::serde_time::rfc3339")]
    pub timestamp: DateTime<Tz>,
    /// `HH:MM`
    pub time_label: String,
    /// `dd/mm`
    pub date_label: String,
    pub wind_speed_kmh: Option<u32>,
    pub wind_gust_kmh: Option<u32>,
    pub direction_degrees: Option<u32>,
    /// Compass abbreviation, e.g. `NE`
    pub compass: Option<String>,
    /// Compass name with the local description
    pub description: Option<String>,
    pub high_divergence: bool,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_kmh(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Whole degrees in `0..360`; 359.6° reads as 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_degrees(value: f64) -> u32 {
    (value.rem_euclid(360.0).round() as u32) % 360
}

impl From<&Observation> for TableRow {
    fn from(obs: &Observation) -> Self {
        let compass = obs.compass();
        Self {
            timestamp: obs.timestamp,
            time_label: obs.timestamp.format("%H:%M").to_string(),
            date_label: obs.timestamp.format("%d/%m").to_string(),
            wind_speed_kmh: obs.wind_speed.map(round_kmh),
            wind_gust_kmh: obs.wind_gust.map(round_kmh),
            direction_degrees: obs.wind_direction.map(round_degrees),
            compass: compass.map(|c| c.abbreviation().to_string()),
            description: compass.map(|c| c.describe()),
            high_divergence: obs.high_divergence,
        }
    }
}

/// The visible slice of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    pub rows: Vec<TableRow>,
    /// Number of rows shown
    pub visible: usize,
    /// Number of rows available
    pub total: usize,
    pub has_more: bool,
    /// Row count to request for the next step
    pub next_row_count: usize,
}

/// Rows for every observation at or after `start`
pub fn table_rows(series: &Series, start: &DateTime<Tz>) -> Vec<TableRow> {
    series
        .iter()
        .filter(|obs| obs.timestamp >= *start)
        .map(TableRow::from)
        .collect()
}

/// Show the first `visible_row_count` rows, clamped to what exists
pub fn paginate(mut rows: Vec<TableRow>, visible_row_count: usize, rows_per_page: usize) -> TablePage {
    let total = rows.len();
    let visible = visible_row_count.min(total);
    rows.truncate(visible);
    TablePage {
        rows,
        visible,
        total,
        has_more: visible < total,
        next_row_count: visible.saturating_add(rows_per_page),
    }
}
