//! Stream Clock
//!
//! Millisecond time axis for the extrema engine.
//! Expiry is always evaluated as of the timestamp handed to the most recent
//! `record` or `advance_to` call - NEVER system time - so a live feed, a
//! test harness, and a replay log all drive the engine identically.

use chrono::{LocalResult, TimeZone, Utc};

/// Milliseconds since Unix epoch (1970-01-01 00:00:00 UTC).
/// i64 gives ~292 million years of range, sufficient for any price stream.
pub type Millis = i64;

/// Conversion constants
pub const MS_PER_SEC: i64 = 1_000;
pub const MS_PER_MIN: i64 = 60 * MS_PER_SEC;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MIN;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Render a millisecond timestamp as UTC for logs and CLI output.
///
/// Falls back to the raw count if the value is outside chrono's
/// representable range.
pub fn format_millis(at: Millis) -> String {
    match Utc.timestamp_millis_opt(at) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        _ => format!("{}ms", at),
    }
}
