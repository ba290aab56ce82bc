//! Error types for the typed request helper.
//!
//! # Design
//! Every failure reaches the immediate caller as an `Err`; nothing is retried
//! or recovered inside the client. `Decoding` means the payload was not JSON
//! at all, while `Shape` means it was JSON that could not become the declared
//! response type.

use thiserror::Error;

/// Errors returned by `TypedClient` and the `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A method name outside `GET`/`POST` was supplied as text.
    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),

    /// The transport could not complete the round trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed")]
    Encoding(#[source] serde_json::Error),

    /// The response body is not parseable JSON.
    #[error("deserialization failed")]
    Decoding(#[source] serde_json::Error),

    /// The response body is JSON but does not fit the declared response type.
    #[error("response does not match {expected}")]
    Shape {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx status under `StatusPolicy::RequireSuccess`.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}
