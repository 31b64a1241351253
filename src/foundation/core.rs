use chrono::{DateTime, NaiveDate};

use crate::foundation::error::{RaceError, RaceResult};

/// Milliseconds in one calendar day.
pub const DAY_MS: f64 = 86_400_000.0;

/// An instant on the simulated timeline, in milliseconds since the Unix epoch (UTC).
///
/// Fractional values are meaningful: the playhead advances by `delta * speed`, which is
/// rarely a whole number of milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Unbounded future; used as the end of the last era.
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Midnight (UTC) at the start of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let ms = date.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp_millis());
        Self(ms as f64)
    }

    /// Last millisecond of `date`.
    pub fn end_of_day(date: NaiveDate) -> Self {
        Self(Self::from_date(date).0 + DAY_MS - 1.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn add_millis(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }

    pub fn add_days(self, days: i64) -> Self {
        Self(self.0 + (days as f64) * DAY_MS)
    }

    /// Calendar day (UTC) containing this instant, if representable.
    pub fn date(self) -> Option<NaiveDate> {
        if !self.0.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(self.0.floor() as i64).map(|dt| dt.date_naive())
    }

    /// Last millisecond of the calendar day containing this instant.
    pub fn end_of_containing_day(self) -> Self {
        match self.date() {
            Some(d) => Self::end_of_day(d),
            None => self,
        }
    }

    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.date() {
            Some(d) => write!(f, "{d}"),
            None if self.0 > 0.0 => f.write_str("+inf"),
            None => f.write_str("-inf"),
        }
    }
}

/// Half-open interval `[start, end)` on the simulated timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp, // exclusive, may be +inf
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> RaceResult<Self> {
        if start.0.is_nan() || end.0.is_nan() {
            return Err(RaceError::validation("TimeWindow bounds must not be NaN"));
        }
        if start.0 > end.0 {
            return Err(RaceError::validation("TimeWindow start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn contains(self, t: Timestamp) -> bool {
        self.start.0 <= t.0 && t.0 < self.end.0
    }

    pub fn span_ms(self) -> f64 {
        self.end.0 - self.start.0
    }
}

/// Parse a `YYYY-MM-DD` calendar day; surrounding whitespace is ignored.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
