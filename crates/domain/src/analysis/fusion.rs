//! Weighted fusion of several forecast sources into one hourly series

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;

use super::floor_to_hour;
use crate::entities::{Observation, Series};
use crate::value_objects::normalize_degrees;

/// A source series with its fusion weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSeries {
    pub weight: f64,
    pub series: Series,
}

impl WeightedSeries {
    #[must_use]
    pub const fn new(weight: f64, series: Series) -> Self {
        Self { weight, series }
    }
}

/// Running weighted mean of one channel
#[derive(Default)]
struct WeightedMean {
    sum: f64,
    weight: f64,
}

impl WeightedMean {
    fn add(&mut self, value: Option<f64>, weight: f64) {
        if let Some(v) = value {
            self.sum += v * weight;
            self.weight += weight;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.weight > 0.0).then(|| self.sum / self.weight)
    }
}

/// Accumulated readings of one hour across sources
#[derive(Default)]
struct HourBucket {
    speed: WeightedMean,
    gust: WeightedMean,
    temperature: WeightedMean,
    precipitation: WeightedMean,
    precipitation_probability: WeightedMean,
    dir_sin: f64,
    dir_cos: f64,
    dir_weight: f64,
    min_speed: Option<f64>,
    max_speed: Option<f64>,
}

impl HourBucket {
    fn add(&mut self, obs: &Observation, weight: f64) {
        self.speed.add(obs.wind_speed, weight);
        self.gust.add(obs.wind_gust, weight);
        self.temperature.add(obs.temperature, weight);
        self.precipitation.add(obs.precipitation, weight);
        self.precipitation_probability
            .add(obs.precipitation_probability, weight);

        if let Some(direction) = obs.wind_direction {
            let radians = direction.to_radians();
            self.dir_sin += radians.sin() * weight;
            self.dir_cos += radians.cos() * weight;
            self.dir_weight += weight;
        }
        if let Some(speed) = obs.wind_speed {
            self.min_speed = Some(self.min_speed.map_or(speed, |m| m.min(speed)));
            self.max_speed = Some(self.max_speed.map_or(speed, |m| m.max(speed)));
        }
    }

    fn into_observation(self, timestamp: DateTime<Tz>, divergence_threshold: f64) -> Observation {
        let direction = (self.dir_weight > 0.0)
            .then(|| normalize_degrees(self.dir_sin.atan2(self.dir_cos).to_degrees()));
        let high_divergence = match (self.min_speed, self.max_speed) {
            (Some(min), Some(max)) => max - min > divergence_threshold,
            _ => false,
        };

        Observation {
            timestamp,
            wind_speed: self.speed.value(),
            wind_gust: self.gust.value(),
            wind_direction: direction,
            temperature: self.temperature.value(),
            precipitation: self.precipitation.value(),
            precipitation_probability: self.precipitation_probability.value(),
            high_divergence,
        }
    }
}

/// Combine weighted sources into one series with one observation per hour
///
/// Each channel is the weighted mean over the sources that report it, and
/// direction is the weighted vector mean. An hour is flagged
/// `high_divergence` when the sustained speeds of its sources spread by more
/// than `divergence_threshold`. Sources with a non-positive or non-finite
/// weight are ignored.
pub fn fuse_by_hour(sources: &[WeightedSeries], divergence_threshold: f64) -> Series {
    let mut buckets: BTreeMap<DateTime<Tz>, HourBucket> = BTreeMap::new();

    for source in sources
        .iter()
        .filter(|s| s.weight.is_finite() && s.weight > 0.0)
    {
        for obs in &source.series {
            buckets
                .entry(floor_to_hour(&obs.timestamp))
                .or_default()
                .add(obs, source.weight);
        }
    }

    // BTreeMap keys are unique and ascending, and every fused channel is a
    // mean of already valid readings
    Series::from_validated(
        buckets
            .into_iter()
            .map(|(hour, bucket)| bucket.into_observation(hour, divergence_threshold))
            .collect(),
    )
}
