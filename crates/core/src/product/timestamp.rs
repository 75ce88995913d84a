//! Timestamp formatting and the clock abstraction used by write paths.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Fixed-width UTC timestamp format shared by `Created` and `Updated`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Formats a UTC instant as `yyyyMMddHHmmss`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Source of the current time for write operations.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current time in the stored timestamp format.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
