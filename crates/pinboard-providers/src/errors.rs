//! Provider error taxonomy.

use thiserror::Error;

/// Errors surfaced by the network-facing collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("http request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// Request URL, for diagnostics.
        url: String,
    },

    /// The upstream security layer served a challenge page instead of the
    /// requested resource.
    #[error("the request was blocked by a security service")]
    Blocked,

    /// The response arrived but could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub(crate) fn invalid(e: impl std::fmt::Display) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
