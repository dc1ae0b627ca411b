//! Error types for sample generation.

use crate::interval::Rejection;
use thiserror::Error;

/// Errors that can occur while drawing samples.
#[derive(Debug, Error)]
pub enum Error {
    /// The time window cannot produce any start instant.
    #[error("invalid time window: {0}")]
    InvalidWindow(String),

    /// Every attempt was rejected.
    #[error("no acceptable sample after {attempts} attempt(s); last rejection: {last}")]
    Exhausted {
        /// Number of candidates drawn.
        attempts: usize,
        /// Why the final candidate was rejected.
        last: Rejection,
    },

    /// The underlying strategy refused to produce a value.
    #[error("generation failed: {0}")]
    Generation(String),
}

/// Result type alias for sample generation.
pub type Result<T> = std::result::Result<T, Error>;
