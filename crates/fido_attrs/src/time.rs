//! Time ranges and timestamp parsing.
//!
//! All instants are naive UTC, matching how observatory archives index
//! their holdings.

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a UTC timestamp.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DDTHH:MM:SS[.f]` and
/// `YYYY-MM-DD HH:MM:SS[.f]`. Bare dates resolve to midnight.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if no layout matches.
///
/// # Example
///
/// ```rust
/// use fido_attrs::parse_time;
///
/// let t = parse_time("1983-05-01").unwrap();
/// assert_eq!(t.to_string(), "1983-05-01 00:00:00");
/// ```
pub fn parse_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    let parsed = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS.iter().find_map(|layout| {
                NaiveDate::parse_from_str(trimmed, layout)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        });

    match parsed {
        Some(time) => {
            debug!(input = trimmed, %time, "parsed time");
            Ok(time)
        }
        None => Err(Error::InvalidTime {
            input: input.to_string(),
        }),
    }
}

/// A closed interval of time, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Endpoints as they arrive on the wire, before ordering is checked.
#[derive(Deserialize)]
struct RawTimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = Error;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        if raw.end < raw.start {
            return Err(Error::EndBeforeStart {
                start: raw.start,
                end: raw.end,
            });
        }
        Ok(Self::new(raw.start, raw.end))
    }
}

impl TimeRange {
    /// Creates a range spanning both instants, in whichever order they are given.
    #[must_use]
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Creates a range starting at `start` and lasting `duration`.
    #[must_use]
    pub fn from_duration(start: NaiveDateTime, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Start of the range.
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the range.
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the range.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Midpoint of the range.
    pub fn center(&self) -> NaiveDateTime {
        self.start + self.duration() / 2
    }

    /// Returns true if `time` lies within the range, endpoints included.
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_time(s).unwrap()
    }

    #[test]
    fn parse_time_date_only() {
        let t = at("1983-05-01");
        let expected = NaiveDate::from_ymd_opt(1983, 5, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(t, expected);
        assert_eq!(at("1983/05/01"), t);
    }

    #[test]
    fn parse_time_with_clock() {
        let t = at("2002-02-01T12:30:15");
        assert_eq!(t.to_string(), "2002-02-01 12:30:15");
        assert_eq!(at("2002-02-01 12:30:15"), t);
    }

    #[test]
    fn parse_time_fractional_seconds() {
        let t = at("2002-02-01T00:00:00.250");
        assert_eq!(t.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert!(matches!(parse_time("yesterday"), Err(Error::InvalidTime { .. })));
        assert!(parse_time("").is_err());
        assert!(parse_time("2002-13-01").is_err());
    }

    #[test]
    fn range_orders_endpoints() {
        let range = TimeRange::new(at("1990-03-15"), at("1990-03-01"));
        assert_eq!(range.start(), at("1990-03-01"));
        assert_eq!(range.end(), at("1990-03-15"));
        assert_eq!(range.duration(), Duration::weeks(2));
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = TimeRange::new(at("1983-04-30"), at("1983-05-01"));
        assert!(range.contains(at("1983-05-01")));
        assert!(range.contains(at("1983-04-30")));
        assert!(!range.contains(at("1983-05-01T00:00:00.000001")));
    }

    #[test]
    fn range_center() {
        let range = TimeRange::from_duration(at("2010-01-01"), Duration::days(2));
        assert_eq!(range.center(), at("2010-01-02"));
    }

    #[test]
    fn zero_length_range_contains_its_instant() {
        let t = at("2010-01-01");
        let range = TimeRange::new(t, t);
        assert!(range.contains(t));
        assert_eq!(range.duration(), Duration::zero());
    }

    #[test]
    fn deserialize_rejects_reversed_range() {
        let reversed = r#"{"start":"2001-01-01T00:00:00","end":"2000-01-01T00:00:00"}"#;
        let err = serde_json::from_str::<TimeRange>(reversed).unwrap_err();
        assert!(err.to_string().contains("before it starts"));
    }

    #[test]
    fn deserialize_round_trips_ordered_range() {
        let range = TimeRange::new(at("2000-01-01"), at("2001-01-01"));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<TimeRange>(&json).unwrap(), range);
    }

    fn epoch_plus(micros: i64) -> NaiveDateTime {
        at("1970-01-01") + Duration::microseconds(micros)
    }

    proptest! {
        #[test]
        fn range_is_ordered_and_holds_both_endpoints(
            a in -2_000_000_000_000_000i64..2_000_000_000_000_000,
            b in -2_000_000_000_000_000i64..2_000_000_000_000_000,
        ) {
            let (a, b) = (epoch_plus(a), epoch_plus(b));
            let range = TimeRange::new(a, b);
            prop_assert!(range.start() <= range.end());
            prop_assert!(range.contains(a));
            prop_assert!(range.contains(b));
            prop_assert!(range.contains(range.center()));
        }
    }
}
