use thiserror::Error;

use super::transport::Method;

/// Errors raised by [`SpotifyClient`](super::SpotifyClient) operations.
///
/// Every variant is terminal for the operation that raised it. The client never
/// retries, so callers can tell a failed request (`Transport`, `UnexpectedStatus`)
/// apart from a malformed response (`Deserialization`) and report them differently.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// The request never produced a response: connection refused, DNS, TLS, timeout.
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The status code is not the one the verb requires (GET → 200, POST → 201).
    #[error("{method} {endpoint} failed with status code {status}")]
    UnexpectedStatus {
        method: Method,
        endpoint: String,
        status: u16,
    },

    /// The body does not have the expected shape.
    #[error("failed to unmarshal response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Creating a playlist was requested without any track to put in it.
    #[error("no tracks found")]
    NoTracks,

    /// A pagination cursor that is not an absolute URL.
    #[error("invalid pagination cursor '{cursor}': {source}")]
    InvalidCursor {
        cursor: String,
        #[source]
        source: url::ParseError,
    },

    #[error("batch size must be greater than zero")]
    InvalidBatchSize,
}

impl SpotifyError {
    /// Returns the HTTP status for `UnexpectedStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotifyError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the Spotify client.
pub type Result<T> = std::result::Result<T, SpotifyError>;
