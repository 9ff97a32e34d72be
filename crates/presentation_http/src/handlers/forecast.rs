//! Forecast report handler

use application::ForecastReport;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Largest accepted `rows` value
pub const MAX_VISIBLE_ROWS: usize = 24 * 16;

/// Query parameters of `GET /v1/forecast`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ForecastQuery {
    /// Table rows to reveal, defaults to one page
    pub rows: Option<usize>,
}

/// Build the report for the configured location
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastReport>, ApiError> {
    let rows = resolve_rows(query.rows, state.forecast_service.settings().rows_per_page)?;
    let report = state.forecast_service.report(&state.request, rows).await?;
    debug!(
        events = report.events.len(),
        rows = report.table.visible,
        "Forecast report built"
    );
    Ok(Json(report))
}

fn resolve_rows(requested: Option<usize>, page: usize) -> Result<usize, ApiError> {
    match requested {
        None => Ok(page),
        Some(rows) if rows > MAX_VISIBLE_ROWS => Err(ApiError::BadRequest(format!(
            "rows must be at most {MAX_VISIBLE_ROWS}, got {rows}"
        ))),
        Some(rows) => Ok(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_defaults_to_page() {
        assert_eq!(resolve_rows(None, 8).unwrap(), 8);
    }

    #[test]
    fn explicit_rows_are_kept() {
        assert_eq!(resolve_rows(Some(0), 8).unwrap(), 0);
        assert_eq!(resolve_rows(Some(16), 8).unwrap(), 16);
    }

    #[test]
    fn oversized_rows_rejected() {
        assert!(matches!(
            resolve_rows(Some(MAX_VISIBLE_ROWS + 1), 8),
            Err(ApiError::BadRequest(_))
        ));
    }
}
