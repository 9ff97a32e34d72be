//! Plain-text rendering of a forecast report

use std::fmt::Write;

use application::{DataStatus, ForecastReport, SourceState, TablePage};
use domain::{EventKind, WindEvent};

/// Event timestamps in cards
const EVENT_TIME_FORMAT: &str = "%d/%m %H:%M";

/// Render the whole report: header, summary card, events, labels and table
pub fn render_report(report: &ForecastReport) -> String {
    let mut out = String::new();
    render_header(&mut out, report);
    render_summary(&mut out, report);
    render_events(&mut out, &report.events);
    render_labels(&mut out, report);
    render_table(&mut out, &report.table);
    render_sources(&mut out, report);
    out
}

fn render_header(out: &mut String, report: &ForecastReport) {
    let header = &report.header;
    let _ = writeln!(out, "🌬️  {} ({})", header.location_name, header.timezone);
    let _ = writeln!(out, "   Updated {}", header.updated_at);
    out.push('\n');
}

fn render_summary(out: &mut String, report: &ForecastReport) {
    let summary = &report.summary;
    let _ = writeln!(out, "Next 24 hours");
    if report.data_status == DataStatus::InsufficientData {
        let _ = writeln!(out, "  ⚠ Not enough forecast data for a reliable average");
    }
    let _ = writeln!(out, "  Average wind  {:>5.1} km/h", summary.mean_speed);
    match summary.peak_time {
        Some(time) => {
            let _ = writeln!(
                out,
                "  Peak gust     {:>5.1} km/h at {}",
                summary.peak_gust,
                time.format(EVENT_TIME_FORMAT)
            );
        },
        None => {
            let _ = writeln!(out, "  Peak gust         - ");
        },
    }
    let _ = writeln!(
        out,
        "  Calm periods  {}",
        if summary.is_calm { "yes" } else { "no" }
    );
    out.push('\n');
}

fn event_line(event: &WindEvent) -> String {
    let marker = match event.kind {
        EventKind::Strong => "▲",
        EventKind::Calm => "▼",
    };
    format!(
        "  {marker} {:<11} {}  {:>5.1} km/h",
        event.kind.label(),
        event.timestamp.format(EVENT_TIME_FORMAT),
        event.severity
    )
}

fn render_events(out: &mut String, events: &[WindEvent]) {
    let _ = writeln!(out, "Highlights");
    if events.is_empty() {
        let _ = writeln!(out, "  No strong or calm hours ahead");
    }
    for event in events {
        let _ = writeln!(out, "{}", event_line(event));
    }
    out.push('\n');
}

fn render_labels(out: &mut String, report: &ForecastReport) {
    if report.labels.is_empty() {
        return;
    }
    let texts: Vec<String> = report
        .labels
        .iter()
        .map(|label| {
            if label.is_event {
                format!("[{}]", label.text)
            } else {
                label.text.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "Chart axis");
    let _ = writeln!(out, "  {}", texts.join(" · "));
    out.push('\n');
}

fn cell(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn render_table(out: &mut String, table: &TablePage) {
    let _ = writeln!(
        out,
        "{:<6} {:<6} {:>5} {:>5}  {:<4} {:>4}",
        "Time", "Date", "Wind", "Gust", "Dir", "°"
    );
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<6} {:<6} {:>5} {:>5}  {:<4} {:>4}{}",
            row.time_label,
            row.date_label,
            cell(row.wind_speed_kmh),
            cell(row.wind_gust_kmh),
            row.compass.as_deref().unwrap_or("-"),
            cell(row.direction_degrees),
            if row.high_divergence { "  ≠" } else { "" }
        );
    }
    let _ = write!(out, "Showing {} of {} hours", table.visible, table.total);
    if table.has_more {
        let _ = write!(out, " (--rows {} for more)", table.next_row_count);
    }
    out.push('\n');
}

fn render_sources(out: &mut String, report: &ForecastReport) {
    for source in &report.sources {
        if source.state == SourceState::Failed {
            let _ = writeln!(
                out,
                "⚠ {} unavailable: {}",
                source.name,
                source.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
