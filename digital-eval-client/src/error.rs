//! Client error types.

use digital_eval_core::CoreError;
use thiserror::Error;

/// Errors surfaced to callers of the session client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The session could not be renewed; the stored token has been cleared.
    #[error("Session expired")]
    AuthExpired,

    /// HTTP error response, passed through unchanged.
    #[error("HTTP error {status}: {body}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Connection-level failure (DNS, connect, reset, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A refresh that did not complete, reported to a caller that asked for
    /// it outside the retry path ([`SessionClient::restore`](crate::SessionClient::restore)).
    #[error("Token refresh failed: {0}")]
    Refresh(RefreshError),

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful response whose content was not what the call expects.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The stored access token could not be decoded.
    #[error(transparent)]
    Claims(#[from] CoreError),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client construction failed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a transport error.
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    /// Get the HTTP status if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::AuthExpired => Some(401),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            Self::Refresh(RefreshError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether the session ended with this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Whether the request never got an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Refresh(RefreshError::Network(_)))
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a refresh attempt failed.
///
/// Cloneable because every caller waiting on the same refresh receives it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The refresh endpoint answered with a non-success status.
    #[error("refresh rejected with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The refresh endpoint could not be reached.
    #[error("refresh request failed: {0}")]
    Network(String),

    /// The refresh endpoint answered with an unreadable body.
    #[error("refresh response could not be decoded: {0}")]
    Decode(String),
}

impl RefreshError {
    /// Whether the server refused the refresh credential, as opposed to the
    /// refresh never completing.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
