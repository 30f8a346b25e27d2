//! Session state shared by every request.

use crate::error::RefreshError;
use crate::singleflight::SingleFlight;
use crate::store::{MemoryTokenStore, TokenStore};
use digital_eval_core::RefreshResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type RefreshOutcome = Result<RefreshResult, RefreshError>;

/// Token as observed at one instant, tagged with the session generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    /// The token, if any.
    pub token: Option<String>,
    /// Generation at the time of the read.
    pub generation: u64,
}

/// The signed-in state of one client.
///
/// Holds the access token (through an injected [`TokenStore`]), a generation
/// counter bumped on every change, and the slot for the one refresh that may
/// be in flight.
#[derive(Debug)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    generation: AtomicU64,
    refresh: SingleFlight<RefreshOutcome>,
}

impl Session {
    /// Create a session backed by `store`.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            refresh: SingleFlight::new(),
        }
    }

    /// Create an empty in-memory session.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Current access token.
    pub fn access_token(&self) -> Option<String> {
        self.store.get()
    }

    /// Whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some()
    }

    /// Read the token together with the current generation.
    pub fn snapshot(&self) -> TokenSnapshot {
        let generation = self.generation.load(Ordering::Acquire);
        TokenSnapshot {
            token: self.store.get(),
            generation,
        }
    }

    /// Number of times the token has been set or cleared.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store a new access token.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.store.set(token.into());
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Drop the access token.
    pub fn clear(&self) {
        self.store.clear();
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_in_flight()
    }

    pub(crate) fn refresh_flight(&self) -> &SingleFlight<RefreshOutcome> {
        &self.refresh
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert_eq!(session.generation(), 0);

        session.set_access_token("tok-1");
        let snap = session.snapshot();
        assert_eq!(snap.token.as_deref(), Some("tok-1"));
        assert_eq!(snap.generation, 1);

        session.clear();
        assert_eq!(session.access_token(), None);
        assert_eq!(session.generation(), 2);
        assert!(!session.is_refreshing());
    }

    #[test]
    fn test_shared_store() {
        let store = Arc::new(MemoryTokenStore::with_token("seeded"));
        let session = Session::new(store.clone());
        assert_eq!(session.access_token().as_deref(), Some("seeded"));

        session.clear();
        assert_eq!(store.get(), None);
    }
}
