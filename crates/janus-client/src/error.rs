//! Error types for client operations.
//!
//! The original platform tooling collapsed every failure into an absent
//! result, leaving "not found" indistinguishable from "the network broke".
//! Here each failure mode gets its own variant, and name lookups that simply
//! find nothing are `Ok(None)` rather than an error.

/// Errors that can occur during a client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required argument was missing or empty; raised before any network
    /// call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The server answered with an HTTP error status. The decoded error body
    /// is carried along when the server sent JSON.
    #[error("API error: {status} {reason}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// HTTP reason phrase.
        reason: String,
        /// The decoded error body, when JSON-decodable.
        body: Option<serde_json::Value>,
    },

    /// The request never produced an HTTP response (connection refused, TLS
    /// failure, timeout, ...).
    #[error("connection error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server reported success but the body was not valid JSON.
    #[error("invalid JSON response from API: {body}")]
    Decode {
        /// The raw response body.
        body: String,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A full scan found no virtual machines, so there is nothing to report.
    #[error("no virtual machines were found")]
    NoVmsFound,

    /// The client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Wrap any transport-level failure.
    pub fn transport(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(source.into())
    }
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
