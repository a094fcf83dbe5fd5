//! Error types for the storefront test harness.
//!
//! # Design
//! HTTP status codes are never errors here: a 404 or 500 is a perfectly
//! good `Outcome` that the calling test judges. Only failures below the HTTP
//! layer, programmer mistakes, and unreadable payloads become `HarnessError`.

use thiserror::Error;

/// Errors returned by `ApiClient`, `Outcome` and `Config`.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Connection refused, DNS failure, timeout, or a body that could not be
    /// read off the wire.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The verb is not one of GET, POST, PUT, DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A request payload could not be encoded, or a response body is not
    /// valid UTF-8 or JSON when decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A header name or value HTTP cannot carry, caught when it is added.
    #[error("invalid header {0}")]
    InvalidHeader(String),

    /// The client was closed before the request was issued.
    #[error("session is closed")]
    SessionClosed,

    /// An environment override could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<ureq::Error> for HarnessError {
    fn from(e: ureq::Error) -> Self {
        HarnessError::Transport(e.to_string())
    }
}
