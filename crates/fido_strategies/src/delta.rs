//! Duration generator.
//!
//! A duration is the sum of seven time-unit magnitudes. Each unit is
//! independently either left out or drawn from `[0, 100]`, which keeps every
//! generated duration non-negative and bounded by [`DeltaComponents::MAX`].

use chrono::Duration;
use proptest::prelude::*;
use serde::Serialize;

/// Largest magnitude drawn for any single unit.
pub const MAX_COMPONENT: f64 = 100.0;

const MICROS_PER_MILLI: f64 = 1e3;
const MICROS_PER_SECOND: f64 = 1e6;
const MICROS_PER_MINUTE: f64 = 60.0 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: f64 = 60.0 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: f64 = 24.0 * MICROS_PER_HOUR;
const MICROS_PER_WEEK: f64 = 7.0 * MICROS_PER_DAY;

/// Per-unit magnitudes of a duration. Units that were not drawn are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DeltaComponents {
    /// Whole or fractional weeks.
    pub weeks: f64,
    /// Days.
    pub days: f64,
    /// Hours.
    pub hours: f64,
    /// Minutes.
    pub minutes: f64,
    /// Seconds.
    pub seconds: f64,
    /// Milliseconds.
    pub milliseconds: f64,
    /// Microseconds.
    pub microseconds: f64,
}

impl DeltaComponents {
    /// Every unit at its maximum.
    pub const MAX: Self = Self {
        weeks: MAX_COMPONENT,
        days: MAX_COMPONENT,
        hours: MAX_COMPONENT,
        minutes: MAX_COMPONENT,
        seconds: MAX_COMPONENT,
        milliseconds: MAX_COMPONENT,
        microseconds: MAX_COMPONENT,
    };

    /// Unit names paired with their magnitudes.
    pub const fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("weeks", self.weeks),
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
            ("milliseconds", self.milliseconds),
            ("microseconds", self.microseconds),
        ]
    }

    /// Total length in (fractional) microseconds.
    pub fn total_microseconds(&self) -> f64 {
        self.weeks * MICROS_PER_WEEK
            + self.days * MICROS_PER_DAY
            + self.hours * MICROS_PER_HOUR
            + self.minutes * MICROS_PER_MINUTE
            + self.seconds * MICROS_PER_SECOND
            + self.milliseconds * MICROS_PER_MILLI
            + self.microseconds
    }

    /// Combines the units into one duration, rounded to the nearest
    /// microsecond with ties going to the even neighbour.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_duration(&self) -> Duration {
        Duration::microseconds(self.total_microseconds().round_ties_even() as i64)
    }
}

fn component() -> impl Strategy<Value = f64> {
    prop::option::of(0.0..=MAX_COMPONENT).prop_map(|magnitude| magnitude.unwrap_or(0.0))
}

/// Strategy for generating per-unit duration magnitudes.
pub fn delta_components() -> impl Strategy<Value = DeltaComponents> {
    (
        component(),
        component(),
        component(),
        component(),
        component(),
        component(),
        component(),
    )
        .prop_map(
            |(weeks, days, hours, minutes, seconds, milliseconds, microseconds)| DeltaComponents {
                weeks,
                days,
                hours,
                minutes,
                seconds,
                milliseconds,
                microseconds,
            },
        )
}

/// Strategy for generating non-negative durations shorter than 115 weeks.
pub fn timedelta() -> impl Strategy<Value = Duration> {
    delta_components().prop_map(|components| components.to_duration())
}
