//! Error types for the product API client.
//!
//! # Design
//! Every non-2xx response collapses into `RequestFailed`, carrying the status
//! reason phrase that users see as `API Error: {reason}`. Connection-level
//! failures get their own `Transport` variant so a dead backend reads
//! differently from one that answered with an error status.

use thiserror::Error;

/// Errors returned by `ProductClient` and by `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("API Error: {reason}")]
    RequestFailed { status: u16, reason: String },

    /// `update` or `remove` was called with an empty identity.
    #[error("a record identity is required for this operation")]
    MissingIdentity,

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to a JSON object.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Build a `RequestFailed` for `status`, using its canonical reason phrase.
    pub fn request_failed(status: u16) -> Self {
        let reason = ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        ApiError::RequestFailed {
            status,
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while resolving `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),
}
