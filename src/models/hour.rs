//! Hour-granularity timestamp used to walk the series.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Format written into synthetic rows (`2023-10-01T10:00`).
pub const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Formats accepted on input. Seconds are tolerated and then dropped.
const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A naive local timestamp truncated to the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourStamp(NaiveDateTime);

impl HourStamp {
    /// Parse a `dateTime` field. Returns `None` on any format error.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(Self::truncate)
    }

    /// Drop minutes, seconds and nanoseconds.
    pub fn truncate(dt: NaiveDateTime) -> Option<Self> {
        dt.with_nanosecond(0)
            .and_then(|d| d.with_second(0))
            .and_then(|d| d.with_minute(0))
            .map(HourStamp)
    }

    /// Whole hours from `self` to `later` (negative when `later` is earlier).
    pub fn hours_until(&self, later: &HourStamp) -> i64 {
        (later.0 - self.0).num_hours()
    }

    /// The stamp `n` hours after this one.
    pub fn plus_hours(&self, n: i64) -> HourStamp {
        HourStamp(self.0 + Duration::hours(n))
    }

    /// Every hour strictly between `self` and `later`, ascending.
    pub fn hours_between(&self, later: &HourStamp) -> impl Iterator<Item = HourStamp> {
        let start = *self;
        let span = self.hours_until(later);
        (1..span).map(move |h| start.plus_hours(h))
    }
}

impl fmt::Display for HourStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(OUTPUT_FORMAT))
    }
}

impl Serialize for HourStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
