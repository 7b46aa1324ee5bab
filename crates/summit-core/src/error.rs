//! # Core Error Types
//!
//! Errors raised while constructing or parsing the foundational types.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations and carry enough context to identify the rejected input.

use thiserror::Error;

/// Errors from the foundational type constructors and parsers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A hex-encoded value could not be decoded.
    #[error("malformed hex value {value:?}: {reason}")]
    MalformedHex {
        /// The offending input.
        value: String,
        /// Why decoding failed.
        reason: String,
    },

    /// A fixed-width value had the wrong length.
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength {
        /// Required byte length.
        expected: usize,
        /// Supplied byte length.
        actual: usize,
    },

    /// A timestamp string or epoch value was rejected.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
