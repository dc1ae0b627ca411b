//! Query attribute model.
//!
//! Attributes are the building blocks of a Fido query. Single attributes
//! combine with `&` into an [`Attr::And`], which is always kept flat.

use crate::error::{Error, Result};
use crate::time::TimeRange;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitAnd;

/// Name of the instrument that recorded the data.
///
/// Names are case-insensitive and stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Instrument(String);

/// Data processing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub i64);

/// Time window a query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Time {
    range: TimeRange,
}

/// A query attribute or a conjunction of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// Restrict to one instrument.
    Instrument(Instrument),
    /// Restrict to one processing level.
    Level(Level),
    /// Restrict to a time window.
    Time(Time),
    /// All of the contained attributes must hold. Never nested.
    And(Vec<Attr>),
}

impl Instrument {
    /// Creates an instrument attribute.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_lowercase())
    }

    /// The lower-cased instrument name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<String> for Instrument {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Instrument> for String {
    fn from(instrument: Instrument) -> Self {
        instrument.0
    }
}

impl Time {
    /// Creates a time attribute from explicit endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndBeforeStart`] if `end` precedes `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(Error::EndBeforeStart { start, end });
        }
        Ok(Self {
            range: TimeRange::new(start, end),
        })
    }

    /// Start of the window.
    pub const fn start(&self) -> NaiveDateTime {
        self.range.start()
    }

    /// End of the window.
    pub const fn end(&self) -> NaiveDateTime {
        self.range.end()
    }

    /// The window as a [`TimeRange`].
    pub const fn range(&self) -> TimeRange {
        self.range
    }
}

impl From<TimeRange> for Time {
    fn from(range: TimeRange) -> Self {
        Self { range }
    }
}

impl Attr {
    /// Names of every instrument mentioned in this attribute.
    pub fn instruments(&self) -> Vec<&str> {
        self.parts()
            .iter()
            .filter_map(|part| match part {
                Self::Instrument(instrument) => Some(instrument.name()),
                _ => None,
            })
            .collect()
    }

    /// The attributes this one is a conjunction of (itself if it is not an `And`).
    pub fn parts(&self) -> &[Self] {
        match self {
            Self::And(parts) => parts,
            single => std::slice::from_ref(single),
        }
    }

    fn into_parts(self) -> Vec<Self> {
        match self {
            Self::And(parts) => parts,
            single => vec![single],
        }
    }
}

impl From<Instrument> for Attr {
    fn from(instrument: Instrument) -> Self {
        Self::Instrument(instrument)
    }
}

impl From<Level> for Attr {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<Time> for Attr {
    fn from(time: Time) -> Self {
        Self::Time(time)
    }
}

impl BitAnd for Attr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        let mut parts = self.into_parts();
        parts.extend(rhs.into_parts());
        Self::And(parts)
    }
}

impl<T: Into<Attr>> BitAnd<T> for Instrument {
    type Output = Attr;

    fn bitand(self, rhs: T) -> Attr {
        Attr::from(self) & rhs.into()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument({})", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({})", self.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({}, {})", self.start(), self.end())
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instrument(instrument) => instrument.fmt(f),
            Self::Level(level) => level.fmt(f),
            Self::Time(time) => time.fmt(f),
            Self::And(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    part.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}
