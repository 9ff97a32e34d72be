//! Chart axis labels: regular ticks merged with event ticks

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, TimeDelta, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use super::{WindEvent, floor_to_hour};

/// `strftime` format of a regular tick, e.g. `14/10 06h`
pub const REGULAR_LABEL_FORMAT: &str = "%d/%m %Hh";

/// `strftime` format of an event tick, e.g. `14/10/2026 06:00`
pub const EVENT_LABEL_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A single x-axis label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabel {
    #[serde(serialize_with = "crate::serde_time::rfc3339")]
    pub timestamp: DateTime<Tz>,
    pub text: String,
    pub is_event: bool,
}

impl AxisLabel {
    /// A short label for a regular tick
    #[must_use]
    pub fn regular(timestamp: DateTime<Tz>) -> Self {
        Self {
            text: timestamp.format(REGULAR_LABEL_FORMAT).to_string(),
            timestamp,
            is_event: false,
        }
    }

    /// A full date and time label for an event tick
    #[must_use]
    pub fn event(timestamp: DateTime<Tz>) -> Self {
        Self {
            text: timestamp.format(EVENT_LABEL_FORMAT).to_string(),
            timestamp,
            is_event: true,
        }
    }
}

/// Fixed-interval tick timestamps covering `[start, end]`
///
/// The first tick is the first whole hour at or after `start`. When `interval` is a
/// whole number of hours dividing a day, ticks sit on local hours that are
/// multiples of it (00h, 03h, 06h, ... for three hours), across DST changes
/// too. A local hour repeated by a DST fall-back is ticked once.
/// A non-positive interval yields no ticks.
pub fn regular_ticks(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    interval: TimeDelta,
) -> Vec<DateTime<Tz>> {
    if interval <= TimeDelta::zero() || start > end {
        return Vec::new();
    }

    let mut tick = floor_to_hour(start);
    if tick < *start {
        tick += TimeDelta::hours(1);
    }

    let whole_hours = interval.num_hours();
    let aligned =
        whole_hours > 0 && interval == TimeDelta::hours(whole_hours) && 24 % whole_hours == 0;
    let step = if aligned { TimeDelta::hours(1) } else { interval };

    let mut ticks: Vec<DateTime<Tz>> = Vec::new();
    while tick <= *end {
        let on_grid = !aligned || i64::from(tick.hour()) % whole_hours == 0;
        let repeated = ticks
            .last()
            .is_some_and(|last| last.naive_local() == tick.naive_local());
        if on_grid && !repeated {
            ticks.push(tick);
        }
        match tick.checked_add_signed(step) {
            Some(next) => tick = next,
            None => break,
        }
    }
    ticks
}

/// Merge regular ticks with event timestamps into one ordered label set
///
/// Labels are strictly increasing by timestamp. Where an event falls on a
/// regular tick the event label takes the slot.
pub fn merge_labels(regular_ticks: &[DateTime<Tz>], events: &[WindEvent]) -> Vec<AxisLabel> {
    let regular: Vec<AxisLabel> = regular_ticks
        .iter()
        .copied()
        .map(AxisLabel::regular)
        .collect();
    let event_labels: Vec<AxisLabel> = events
        .iter()
        .map(|event| AxisLabel::event(event.timestamp))
        .collect();
    merge_label_sets(&regular, &event_labels)
}

/// Merge two label sets
///
/// At a shared timestamp an event label replaces a regular one; otherwise
/// the label seen first is kept. Merging a result again with any subset of
/// its own labels returns it unchanged.
pub fn merge_label_sets(base: &[AxisLabel], overlay: &[AxisLabel]) -> Vec<AxisLabel> {
    let mut slots: BTreeMap<DateTime<Tz>, AxisLabel> = BTreeMap::new();
    for label in base.iter().chain(overlay) {
        match slots.entry(label.timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(label.clone());
            },
            Entry::Occupied(mut slot) => {
                if label.is_event && !slot.get().is_event {
                    slot.insert(label.clone());
                }
            },
        }
    }
    slots.into_values().collect()
}
