//! Error types for attribute construction.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while building query attributes.
#[derive(Debug, Error)]
pub enum Error {
    /// A timestamp string matched none of the accepted layouts.
    #[error("invalid time '{input}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS[.f]")]
    InvalidTime {
        /// The string that failed to parse.
        input: String,
    },

    /// A time attribute was given an end earlier than its start.
    #[error("time range ends at {end} before it starts at {start}")]
    EndBeforeStart {
        /// Requested start.
        start: NaiveDateTime,
        /// Requested end.
        end: NaiveDateTime,
    },
}

/// Result type alias for attribute operations.
pub type Result<T> = std::result::Result<T, Error>;
