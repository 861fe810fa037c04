//! Error types for signing, fetching, and mapping catalog responses.

use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between building a request and returning a typed response.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure before a response was received.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("request failed with status: {0}")]
    Status(u16),

    /// The request did not complete within its deadline.
    #[error("request exceeded deadline of {0:?}")]
    Timeout(Duration),

    /// The service explicitly marked the request as invalid.
    #[error("request {request_id} was rejected as invalid by the service")]
    InvalidRequest { request_id: String },

    /// A mandatory element was absent from the response.
    #[error("malformed response: missing element {0}")]
    MissingElement(String),

    /// An element was present but its text could not be interpreted.
    #[error("malformed response: {element} has unexpected value {value:?}")]
    InvalidValue { element: String, value: String },

    /// An item lookup did not return exactly one item.
    #[error("malformed response: expected exactly 1 item, found {0}")]
    UnexpectedItemCount(usize),

    /// The response body was not well-formed XML.
    #[error("failed to parse XML: {0}")]
    Xml(String),

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for failures that happened before a response body was available.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Status(_) | Error::Timeout(_))
    }

    /// True when the service accepted the request but returned an unexpected shape.
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Error::MissingElement(_)
                | Error::InvalidValue { .. }
                | Error::UnexpectedItemCount(_)
                | Error::Xml(_)
        )
    }
}
