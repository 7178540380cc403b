//! Time-related utilities with clock abstraction for testability.
//!
//! All timestamps handled by Genkan are UTC with second precision.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current UTC time truncated to whole seconds
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        current_utc_seconds()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock from a Unix timestamp in seconds
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self {
            fixed_time: DateTime::from_timestamp(seconds, 0).unwrap_or_default(),
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Get current UTC time truncated to whole seconds
pub fn current_utc_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Format a UTC instant as RFC 3339 with second precision (`+00:00` offset)
pub fn to_rfc3339_seconds(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse an RFC 3339 string into UTC, dropping sub-second precision
///
/// Returns `None` when the input is not valid RFC 3339.
pub fn parse_rfc3339_utc(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
}
