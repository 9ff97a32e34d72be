//! TTL cache of fetched forecasts
//!
//! Entries are keyed by [`ForecastRequest::cache_key`] and expire relative to
//! an injected [`ClockPort`], so expiry is deterministic under test.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use application::ports::{ClockPort, FetchedForecast, ForecastRequest};
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

/// Default freshness window
pub const DEFAULT_TTL_MINUTES: u32 = 30;

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Entry {
    forecast: FetchedForecast,
    fetched_at: DateTime<Utc>,
}

/// In-memory forecast cache with time-based expiry
pub struct ForecastCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: TimeDelta,
    clock: Arc<dyn ClockPort>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ForecastCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastCache")
            .field("entries", &self.entries.lock().len())
            .field("ttl", &self.ttl)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ForecastCache {
    #[must_use]
    pub fn new(ttl: TimeDelta, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache with a TTL given in minutes
    #[must_use]
    pub fn with_ttl_minutes(minutes: u32, clock: Arc<dyn ClockPort>) -> Self {
        Self::new(TimeDelta::minutes(i64::from(minutes)), clock)
    }

    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Fresh entry for `request`, if any
    ///
    /// An entry is fresh while `now - fetched_at < ttl`; stale entries are
    /// evicted on lookup.
    pub fn get(&self, request: &ForecastRequest) -> Option<FetchedForecast> {
        let key = request.cache_key();
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let fresh = entries
            .get(&key)
            .is_some_and(|entry| now - entry.fetched_at < self.ttl);

        if fresh {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            return entries.get(&key).map(|entry| entry.forecast.clone());
        }

        if entries.remove(&key).is_some() {
            debug!(key = %key, "Cache entry expired");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Cache miss");
        None
    }

    /// Store `forecast`, stamped with the current clock time
    pub fn insert(&self, request: &ForecastRequest, forecast: FetchedForecast) {
        let key = request.cache_key();
        let fetched_at = self.clock.now();
        debug!(key = %key, "Cache set");
        self.entries.lock().insert(
            key,
            Entry {
                forecast,
                fetched_at,
            },
        );
    }

    pub fn invalidate(&self, request: &ForecastRequest) {
        self.entries.lock().remove(&request.cache_key());
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len(),
        }
    }
}
