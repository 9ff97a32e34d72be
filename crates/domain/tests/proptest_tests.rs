//! Property-based tests for the analysis pipeline
//!
//! These tests use proptest to verify invariants across many random series.

use chrono::{DateTime, TimeDelta, TimeZone};
use chrono_tz::{America::Sao_Paulo, Tz};
use domain::analysis::{
    AxisLabel, DetectionThresholds, WeightedSeries, Window, detect_events, fuse_by_hour,
    merge_label_sets, merge_labels, regular_ticks, select, summarize,
};
use domain::entities::{Observation, Series};
use domain::value_objects::{CompassSector, GeoLocation, normalize_degrees};
use proptest::prelude::*;

fn base() -> DateTime<Tz> {
    Sao_Paulo
        .with_ymd_and_hms(2026, 10, 14, 0, 0, 0)
        .single()
        .expect("valid local time")
}

fn reading() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        6 => (0.0f64..60.0).prop_map(Some),
    ]
}

fn arb_series() -> impl Strategy<Value = Series> {
    prop::collection::vec((reading(), reading(), 0.0f64..360.0), 0..72).prop_map(|points| {
        let observations = points
            .into_iter()
            .enumerate()
            .map(|(i, (speed, gust, dir))| {
                let hours = i64::try_from(i).unwrap_or_default();
                Observation::new(base() + TimeDelta::hours(hours))
                    .with_speed(speed)
                    .with_gust(gust)
                    .with_direction(Some(dir))
            })
            .collect();
        Series::new(observations).expect("generated series is valid")
    })
}

// ============================================================================
// Window Selector Property Tests
// ============================================================================

mod window_tests {
    use super::*;

    proptest! {
        #[test]
        fn window_is_contained_in_range(
            series in arb_series(),
            offset in -5i64..80,
            hours in -2i64..30
        ) {
            let now = base() + TimeDelta::hours(offset);
            let duration = TimeDelta::hours(hours);
            let window = select(&series, &now, duration);
            for obs in window {
                prop_assert!(obs.timestamp >= now);
                prop_assert!(obs.timestamp < now + duration);
            }
            let expected = series
                .iter()
                .filter(|o| o.timestamp >= now && o.timestamp < now + duration)
                .count();
            prop_assert_eq!(window.len(), expected);
        }
    }
}

// ============================================================================
// Summary Aggregator Property Tests
// ============================================================================

mod summary_tests {
    use super::*;

    proptest! {
        #[test]
        fn peak_is_true_maximum_at_earliest_time(series in arb_series()) {
            let summary = summarize(Window::from(&series));
            let gusts: Vec<(f64, DateTime<Tz>)> = series
                .iter()
                .filter_map(|o| o.wind_gust.map(|g| (g, o.timestamp)))
                .collect();

            match gusts.iter().map(|(g, _)| *g).reduce(f64::max) {
                Some(max) => {
                    prop_assert!((summary.peak_gust - max).abs() < f64::EPSILON);
                    let earliest = gusts
                        .iter()
                        .find(|(g, _)| (*g - max).abs() < f64::EPSILON)
                        .map(|(_, t)| *t);
                    prop_assert_eq!(summary.peak_time, earliest);
                },
                None => prop_assert!(summary.peak_time.is_none()),
            }
        }

        #[test]
        fn peak_time_lies_inside_window(series in arb_series(), offset in 0i64..72) {
            let now = base() + TimeDelta::hours(offset);
            let window = select(&series, &now, TimeDelta::hours(24));
            if let Some(peak) = summarize(window).peak_time {
                prop_assert!(window.iter().any(|o| o.timestamp == peak));
            }
        }

        #[test]
        fn mean_is_bounded_by_readings(series in arb_series()) {
            let summary = summarize(Window::from(&series));
            let speeds: Vec<f64> = series.iter().filter_map(|o| o.wind_speed).collect();
            if let (Some(min), Some(max)) = (
                speeds.iter().copied().reduce(f64::min),
                speeds.iter().copied().reduce(f64::max),
            ) {
                prop_assert!(summary.mean_speed >= min - 1e-9);
                prop_assert!(summary.mean_speed <= max + 1e-9);
                prop_assert_eq!(summary.is_calm, min < 3.0);
            } else {
                prop_assert!(summary.is_calm);
            }
        }
    }
}

// ============================================================================
// Event Detector Property Tests
// ============================================================================

mod event_tests {
    use super::*;

    proptest! {
        #[test]
        fn event_count_is_bounded(series in arb_series(), max_events in 0usize..15) {
            let thresholds = DetectionThresholds::new(20.0, 3.0, max_events)
                .expect("valid thresholds");
            let events = detect_events(Window::from(&series), &thresholds);
            prop_assert!(events.len() <= max_events);
        }

        #[test]
        fn events_are_ranked_with_earliest_tie_break(series in arb_series()) {
            let events = detect_events(Window::from(&series), &DetectionThresholds::default());
            for pair in events.windows(2) {
                prop_assert!(pair[0].notability >= pair[1].notability);
                if (pair[0].notability - pair[1].notability).abs() < f64::EPSILON {
                    prop_assert!(pair[0].timestamp < pair[1].timestamp);
                }
            }
        }

        #[test]
        fn event_timestamps_are_unique(series in arb_series()) {
            let events = detect_events(Window::from(&series), &DetectionThresholds::default());
            let mut stamps: Vec<DateTime<Tz>> = events.iter().map(|e| e.timestamp).collect();
            stamps.sort();
            stamps.dedup();
            prop_assert_eq!(stamps.len(), events.len());
        }

        #[test]
        fn notability_stays_in_unit_range(series in arb_series()) {
            for event in detect_events(Window::from(&series), &DetectionThresholds::default()) {
                prop_assert!((0.0..=1.0).contains(&event.notability));
            }
        }
    }
}

// ============================================================================
// Axis Label Merger Property Tests
// ============================================================================

mod label_tests {
    use super::*;

    proptest! {
        #[test]
        fn merged_labels_strictly_increase(series in arb_series()) {
            let events = detect_events(Window::from(&series), &DetectionThresholds::default());
            let ticks = regular_ticks(&base(), &(base() + TimeDelta::hours(72)), TimeDelta::hours(3));
            let labels = merge_labels(&ticks, &events);
            prop_assert!(labels.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

            for event in &events {
                let slot = labels.iter().find(|l| l.timestamp == event.timestamp);
                prop_assert!(slot.is_some_and(|l| l.is_event));
            }
        }

        #[test]
        fn merge_is_idempotent(series in arb_series()) {
            let events = detect_events(Window::from(&series), &DetectionThresholds::default());
            let ticks = regular_ticks(&base(), &(base() + TimeDelta::hours(72)), TimeDelta::hours(3));
            let once = merge_labels(&ticks, &events);
            prop_assert_eq!(&merge_label_sets(&once, &[]), &once);

            let event_labels: Vec<AxisLabel> =
                events.iter().map(|e| AxisLabel::event(e.timestamp)).collect();
            prop_assert_eq!(&merge_label_sets(&once, &event_labels), &once);
        }

        #[test]
        fn merge_ignores_event_order(series in arb_series()) {
            let events = detect_events(Window::from(&series), &DetectionThresholds::default());
            let mut reversed = events.clone();
            reversed.reverse();
            let ticks = regular_ticks(&base(), &(base() + TimeDelta::hours(72)), TimeDelta::hours(3));
            prop_assert_eq!(merge_labels(&ticks, &events), merge_labels(&ticks, &reversed));
        }
    }
}

// ============================================================================
// Fusion Property Tests
// ============================================================================

mod fusion_tests {
    use super::*;

    proptest! {
        #[test]
        fn fused_series_is_valid(
            a in arb_series(),
            b in arb_series(),
            wa in 0.1f64..5.0,
            wb in 0.1f64..5.0
        ) {
            let fused = fuse_by_hour(
                &[WeightedSeries::new(wa, a), WeightedSeries::new(wb, b)],
                8.0,
            );
            let rebuilt = Series::new(fused.observations().to_vec());
            prop_assert!(rebuilt.is_ok());
        }
    }
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalized_degrees_in_range(deg in -10_000.0f64..10_000.0) {
            let n = normalize_degrees(deg);
            prop_assert!((0.0..360.0).contains(&n));
        }

        #[test]
        fn compass_sector_matches_formula(deg in 0.0f64..360.0) {
            let expected = ((deg + 22.5) % 360.0 / 45.0).floor();
            let sector = CompassSector::from_degrees(deg);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = expected as usize;
            prop_assert_eq!(CompassSector::ALL[index], sector);
        }

        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon);
            prop_assert!(loc.is_ok());
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}
