//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used when recording telemetry.
pub type Timestamp = DateTime<Utc>;

/// Layout of the `timestamp` column in stored telemetry rows.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp the way telemetry rows store it.
#[must_use]
pub fn format_record_timestamp(ts: Timestamp) -> String {
    ts.format(RECORD_TIMESTAMP_FORMAT).to_string()
}
