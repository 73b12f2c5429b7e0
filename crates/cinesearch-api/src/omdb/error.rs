//! Lookup failure taxonomy.

use thiserror::Error;

/// Failure of a single OMDb lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service answered with `Response: "False"` (bad query, no matches, bad key).
    #[error("OMDb API error: {0}")]
    Service(String),
    /// The service answered with a non-success HTTP status.
    #[error("OMDb API error (HTTP {status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Service message or raw body.
        message: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("OMDb request failed: {0}")]
    Transport(String),
    /// The body was not the expected JSON.
    #[error("failed to decode OMDb response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Returns `true` for failures reported by the service itself.
    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}
