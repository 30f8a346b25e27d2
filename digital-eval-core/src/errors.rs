//! Error types for digital-eval core types.

use thiserror::Error;

/// Errors raised while interpreting tokens and wire values.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The token does not have the `header.payload.signature` shape.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// A token segment is not valid base64url.
    #[error("Token encoding error: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The token payload is not the expected JSON claims object.
    #[error("Invalid token claims: {0}")]
    Claims(#[from] serde_json::Error),

    /// A role string outside the known set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl CoreError {
    /// Create a malformed token error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }
}

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
