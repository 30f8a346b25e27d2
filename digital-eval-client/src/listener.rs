//! Session-ended notifications.
//!
//! When the client gives up on a session it clears the stored token and tells
//! the host, which typically sends the user back to the login page.

use crate::error::RefreshError;
use std::fmt;

/// Why the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEndReason {
    /// The refresh call failed.
    RefreshFailed(RefreshError),
    /// The refresh endpoint itself answered 401 to a direct request.
    RefreshUnauthorized,
    /// A request was still unauthorized after one refresh and retry.
    UnauthorizedAfterRetry,
}

impl fmt::Display for SessionEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefreshFailed(err) => write!(f, "{err}"),
            Self::RefreshUnauthorized => f.write_str("refresh endpoint returned 401"),
            Self::UnauthorizedAfterRetry => f.write_str("still unauthorized after refresh"),
        }
    }
}

/// Notification passed to [`SessionListener::on_session_ended`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnded {
    /// Why the session ended.
    pub reason: SessionEndReason,
    /// Path or URL of the request that hit the failure, if any.
    pub request: Option<String>,
}

impl SessionEnded {
    /// Create a notification.
    pub fn new(reason: SessionEndReason) -> Self {
        Self {
            reason,
            request: None,
        }
    }

    /// Attach the request that hit the failure.
    #[must_use]
    pub fn with_request(mut self, request: impl Into<String>) -> Self {
        self.request = Some(request.into());
        self
    }
}

/// Host hook invoked when the session ends.
pub trait SessionListener: Send + Sync {
    /// Called once per terminal authentication failure, after the token has
    /// been cleared.
    fn on_session_ended(&self, event: &SessionEnded);
}

impl<F> SessionListener for F
where
    F: Fn(&SessionEnded) + Send + Sync,
{
    fn on_session_ended(&self, event: &SessionEnded) {
        self(event)
    }
}

/// Listener that ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SessionListener for NoopListener {
    fn on_session_ended(&self, _event: &SessionEnded) {}
}
