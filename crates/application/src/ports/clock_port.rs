//! Clock port
//!
//! The wall clock is an injected dependency so every time-dependent result
//! can be reproduced in tests.

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Source of the current instant
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}
