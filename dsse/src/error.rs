//! Error types for envelopes

use thiserror::Error;

use crate::crypto::KeyError;

/// Shorthand for results produced by this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error types for envelopes
#[derive(Error, Debug)]
pub enum Error {
    /// A caller supplied argument can never lead to a valid outcome
    #[error("Invalid argument: {msg}")]
    InvalidArgument {
        /// Error message
        msg: String,
    },
    /// A required top-level field was absent from the wire representation
    #[error("Missing required envelope field \"{field}\"")]
    MissingField {
        /// Name of the field as it appears on the wire
        field: &'static str,
    },
    /// The wire representation is present but malformed
    #[error("Malformed envelope: {msg}")]
    Format {
        /// Error message
        msg: String,
    },
    /// The payload could not be decoded from base64
    #[error("Could not decode envelope payload base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The envelope could not be read from or written to JSON text
    #[error("Could not process envelope JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Too few distinct keys produced a valid signature
    #[error("Accepted signatures do not match threshold, found: {accepted}, expected: {threshold}")]
    VerificationFailed {
        /// Number of distinct keys that verified
        accepted: usize,
        /// Number of distinct keys required
        threshold: usize,
    },
    /// A key could not complete verification at all
    #[error(transparent)]
    Key(#[from] KeyError),
    /// The payload did not match the requested shape
    #[error("Could not deserialize envelope payload: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument { msg: msg.into() }
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format { msg: msg.into() }
    }
}
