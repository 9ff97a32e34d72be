//! Serialization helpers for zoned timestamps
//!
//! Zoned timestamps are written as RFC 3339 strings with a numeric offset.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serializer;

/// Serialize a zoned timestamp as RFC 3339
pub fn rfc3339<S: Serializer>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

/// Serialize an optional zoned timestamp as RFC 3339 or `null`
#[allow(clippy::ref_option)]
pub fn rfc3339_opt<S: Serializer>(
    value: &Option<DateTime<Tz>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}
