//! Application services - Use case implementations

mod forecast_service;
mod forecast_table;
mod health_service;

pub use forecast_service::{
    AnalysisSettings, DataStatus, ForecastReport, ForecastService, MIN_POINTS_FOR_AVERAGE,
    ReportHeader, UPDATED_AT_FORMAT, build_report,
};
pub use forecast_table::{ROWS_PER_PAGE, TablePage, TableRow, paginate, table_rows};
pub use health_service::{HealthReport, HealthService, ServiceHealth};
