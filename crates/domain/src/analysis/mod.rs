//! Forecast aggregation and event highlighting
//!
//! Every function here is a pure derivation from its explicit inputs:
//! `now`, thresholds and intervals are always supplied by the caller.

mod events;
mod fusion;
mod labels;
mod summary;
mod window;

pub use events::{DetectionThresholds, EventKind, WindEvent, detect_events};
pub use fusion::{WeightedSeries, fuse_by_hour};
pub use labels::{
    AxisLabel, EVENT_LABEL_FORMAT, REGULAR_LABEL_FORMAT, merge_label_sets, merge_labels,
    regular_ticks,
};
pub use summary::{CALM_THRESHOLD_KMH, Summary, summarize, summarize_with_threshold};
pub use window::{Window, floor_to_hour, select};
