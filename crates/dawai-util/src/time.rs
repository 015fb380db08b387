//! Time utilities for dawai-invoices
//!
//! All calendar bucketing uses the LOCAL time zone: two invoices created in
//! the same local calendar day land in the same period file.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `DAWAI_MOCK_TIME` environment variable can be set to
//! override the system time for all time-sensitive operations. This is useful
//! for exercising month/day partitioning without waiting for the calendar.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2024-06-10 14:30:00`)

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "DAWAI_MOCK_TIME";

/// Offset between mock time and real time, fixed at first use so mock time
/// advances at the real clock's rate afterwards.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

fn mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            std::env::var(MOCK_TIME_ENV_VAR)
                .ok()
                .and_then(|raw| parse_mock_offset(&raw, chrono::Local::now()))
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Parse a mock time string and compute its offset from `real_now`.
/// A malformed or ambiguous value disables mocking with a warning.
fn parse_mock_offset(raw: &str, real_now: DateTime<Local>) -> Option<chrono::Duration> {
    let naive = match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => naive,
        Err(_) => {
            tracing::warn!(
                mock_time = %raw,
                expected_format = "%Y-%m-%d %H:%M:%S",
                "Invalid mock time format"
            );
            return None;
        }
    };

    let mock_now = match Local.from_local_datetime(&naive).single() {
        Some(mock_now) => mock_now,
        None => {
            tracing::warn!(mock_time = %raw, "Mock time is ambiguous in the local timezone");
            return None;
        }
    };

    let offset = mock_now.signed_duration_since(real_now);
    tracing::info!(
        mock_time = %raw,
        offset_secs = offset.num_seconds(),
        "Mock time enabled"
    );
    Some(offset)
}

/// Get the current local time, respecting mock time settings in debug builds.
///
/// In release builds, this always returns the real system time.
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    match mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Milliseconds since the Unix epoch for a local timestamp.
pub fn epoch_millis(dt: &DateTime<Local>) -> i64 {
    dt.timestamp_millis()
}

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    epoch_millis(&now())
}
