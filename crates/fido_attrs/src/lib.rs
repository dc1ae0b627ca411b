//! Typed query attributes for Fido searches.
//!
//! This crate provides:
//! - Instrument, level and time attributes
//! - `&` composition of attributes into a single query
//! - Time ranges with inclusive containment checks
//! - Lenient timestamp parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use fido_attrs::{parse_time, Attr, Instrument, Level, Time};
//!
//! let query = Attr::from(Instrument::new("eve")) & Level(0).into();
//! let time = Time::new(parse_time("2012-03-04")?, parse_time("2012-03-05")?)?;
//! assert_eq!(query.to_string(), "Instrument(eve) & Level(0)");
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod attr;
pub mod error;
pub mod time;

pub use attr::{Attr, Instrument, Level, Time};
pub use error::{Error, Result};
pub use time::{parse_time, TimeRange};
