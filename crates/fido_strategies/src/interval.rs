//! Time interval generators.
//!
//! Intervals are drawn generate-and-test: a start instant inside a
//! [`TimeWindow`], plus a [`timedelta`], then kept only if the window accepts
//! the pair. The window always demands that the interval ends before `now`;
//! instrument windows add their own constraints on top.

use crate::delta::timedelta;
use crate::error::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use fido_attrs::{Time, TimeRange};
use proptest::prelude::*;

/// Earliest start year for unconstrained intervals.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// First year of GOES X-ray data.
pub const GOES_MIN_YEAR: i32 = 1981;

/// First year of RHESSI data.
pub const RHESSI_MIN_YEAR: i32 = 2002;

/// Midnight UTC on the given date.
///
/// # Panics
///
/// Panics if the date does not exist.
fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid calendar date")
}

/// The day GOES has no X-ray data for. Intervals covering it return nothing.
pub fn goes_data_gap() -> NaiveDateTime {
    midnight(1983, 5, 1)
}

/// RHESSI commissioning. Nothing is archived before this instant.
pub fn rhessi_commissioned() -> NaiveDateTime {
    midnight(2002, 2, 1)
}

/// Why a candidate interval was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The interval reaches `now` or later.
    #[error("interval ends at {end}, not before {now}")]
    EndNotInPast {
        /// End of the candidate.
        end: NaiveDateTime,
        /// The window's notion of the present.
        now: NaiveDateTime,
    },

    /// The interval starts on or before the window's lower limit.
    #[error("interval starts at {start}, not after {limit}")]
    StartTooEarly {
        /// Start of the candidate.
        start: NaiveDateTime,
        /// The instant the start must follow.
        limit: NaiveDateTime,
    },

    /// The interval covers an excluded instant.
    #[error("interval covers excluded instant {excluded}")]
    ContainsExcluded {
        /// The covered instant.
        excluded: NaiveDateTime,
    },
}

/// Where interval starts are drawn from and which intervals are acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Earliest year a start may fall in.
    pub min_year: i32,
    /// Latest year a start may fall in.
    pub max_year: i32,
    /// Intervals must end strictly before this instant. Starts are capped at it.
    pub now: NaiveDateTime,
    /// If set, starts must be strictly after this instant.
    pub starts_after: Option<NaiveDateTime>,
    /// Instants no interval may cover.
    pub excluded: Vec<NaiveDateTime>,
}

impl Default for TimeWindow {
    fn default() -> Self {
        let now = Utc::now().naive_utc();
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: now.year(),
            now,
            starts_after: None,
            excluded: Vec::new(),
        }
    }
}

impl TimeWindow {
    /// Creates a window starting at the given year and ending at the present.
    #[must_use]
    pub fn new(min_year: i32) -> Self {
        Self {
            min_year,
            ..Self::default()
        }
    }

    /// Window for GOES: data from 1981 on, minus the 1983-05-01 gap.
    #[must_use]
    pub fn goes() -> Self {
        Self::new(GOES_MIN_YEAR).excluding(goes_data_gap())
    }

    /// Window for RHESSI: data after commissioning on 2002-02-01.
    #[must_use]
    pub fn rhessi() -> Self {
        Self::new(RHESSI_MIN_YEAR).starting_after(rhessi_commissioned())
    }

    /// Sets the earliest start year.
    #[must_use]
    pub const fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Sets the latest start year.
    #[must_use]
    pub const fn with_max_year(mut self, year: i32) -> Self {
        self.max_year = year;
        self
    }

    /// Pins the present to `now` instead of the wall clock.
    #[must_use]
    pub const fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Requires starts strictly after `limit`.
    #[must_use]
    pub const fn starting_after(mut self, limit: NaiveDateTime) -> Self {
        self.starts_after = Some(limit);
        self
    }

    /// Forbids intervals covering `instant`.
    #[must_use]
    pub fn excluding(mut self, instant: NaiveDateTime) -> Self {
        self.excluded.push(instant);
        self
    }

    /// Checks that the window can produce at least one start instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if a year is outside `1..=9999`, the
    /// years are reversed, or the window starts after `now`.
    pub fn validate(&self) -> Result<()> {
        self.start_span().map(|_| ())
    }

    /// Earliest start and the number of microseconds starts may range over.
    fn start_span(&self) -> Result<(NaiveDateTime, i64)> {
        for year in [self.min_year, self.max_year] {
            if !(1..=9999).contains(&year) {
                return Err(Error::InvalidWindow(format!("year {year} outside 1..=9999")));
            }
        }
        if self.min_year > self.max_year {
            return Err(Error::InvalidWindow(format!(
                "min_year {} is after max_year {}",
                self.min_year, self.max_year
            )));
        }

        let earliest = midnight(self.min_year, 1, 1);
        let year_end =
            midnight(self.max_year, 12, 31) + Duration::days(1) - Duration::microseconds(1);
        let latest = year_end.min(self.now);
        if latest < earliest {
            return Err(Error::InvalidWindow(format!(
                "window starts at {earliest}, after now ({})",
                self.now
            )));
        }

        let span = (latest - earliest)
            .num_microseconds()
            .ok_or_else(|| Error::InvalidWindow("window too wide".to_string()))?;
        Ok((earliest, span))
    }

    /// Decides whether `[start, end]` is an acceptable interval.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies.
    pub fn check(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> std::result::Result<(), Rejection> {
        if end >= self.now {
            return Err(Rejection::EndNotInPast { end, now: self.now });
        }
        if let Some(limit) = self.starts_after {
            if start <= limit {
                return Err(Rejection::StartTooEarly { start, limit });
            }
        }
        let range = TimeRange::new(start, end);
        if let Some(&excluded) = self.excluded.iter().find(|&&t| range.contains(t)) {
            return Err(Rejection::ContainsExcluded { excluded });
        }
        Ok(())
    }

    /// Returns true if `[start, end]` is an acceptable interval.
    pub fn accepts(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.check(start, end).is_ok()
    }
}

/// Strategy for `start..start + delta` ranges before any acceptance check.
///
/// # Panics
///
/// Panics if `window` fails [`TimeWindow::validate`].
pub fn interval_candidate(window: &TimeWindow) -> impl Strategy<Value = TimeRange> {
    let (earliest, span) = window.start_span().unwrap_or_else(|e| panic!("{e}"));
    (0..=span, timedelta()).prop_map(move |(offset, delta)| {
        TimeRange::from_duration(earliest + Duration::microseconds(offset), delta)
    })
}

/// Strategy for time attributes drawn from `window`.
///
/// # Panics
///
/// Panics if `window` fails [`TimeWindow::validate`].
pub fn time_attr_in(window: TimeWindow) -> impl Strategy<Value = Time> {
    interval_candidate(&window)
        .prop_filter("interval rejected by its time window", move |range| {
            window.accepts(range.start(), range.end())
        })
        .prop_map(Time::from)
}

/// Strategy for time attributes starting in 1900 or later and ending in the past.
pub fn time_attr() -> impl Strategy<Value = Time> {
    time_attr_in(TimeWindow::default())
}

/// Strategy for time attributes GOES can serve.
pub fn goes_time() -> impl Strategy<Value = Time> {
    time_attr_in(TimeWindow::goes())
}

/// Strategy for time attributes RHESSI can serve.
pub fn rhessi_time() -> impl Strategy<Value = Time> {
    time_attr_in(TimeWindow::rhessi())
}
