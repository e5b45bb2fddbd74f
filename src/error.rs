//! Errors raised while fetching members

use thiserror::Error;

/// Failure of one member query
///
/// Captured by the coordinator and shown inline; never propagated past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx HTTP response
    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response carried GraphQL errors
    #[error("GraphQL error: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// Body or connection field could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The worker ended without reporting a result
    #[error("Fetch worker disconnected")]
    Disconnected,
}
