//! Property-based generators of valid Fido query inputs.
//!
//! This crate provides:
//! - Durations built from independently drawn time-unit magnitudes
//! - Instrument selectors for offline and online data sources
//! - Time intervals that never reach into the future, with
//!   instrument-specific variants for GOES and RHESSI
//! - A seeded sampler that replaces rejection with a bounded retry loop
//!
//! # Example
//!
//! ```rust,ignore
//! use fido_strategies::{goes_time, offline_instruments};
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn query_builds(time in goes_time(), instrument in offline_instruments()) {
//!         let query = instrument & time.into();
//!         prop_assert!(!query.instruments().is_empty());
//!     }
//! }
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod delta;
pub mod error;
pub mod instruments;
pub mod interval;
pub mod sampler;

pub use delta::{delta_components, timedelta, DeltaComponents};
pub use error::{Error, Result};
pub use instruments::{offline_instruments, online_instruments};
pub use interval::{
    goes_time, interval_candidate, rhessi_time, time_attr, time_attr_in, Rejection, TimeWindow,
};
pub use sampler::{Sampler, SamplerConfig};
