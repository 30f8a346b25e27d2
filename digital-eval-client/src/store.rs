//! Access token storage.

use parking_lot::RwLock;
use std::fmt;

/// Scoped key-value storage for the access token.
///
/// The client only ever reads, replaces, or drops the token; where it lives is
/// up to the host.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Current token, if any.
    fn get(&self) -> Option<String>;

    /// Replace the token.
    fn set(&self, token: String);

    /// Drop the token.
    fn clear(&self);
}

/// Token store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set(&self, token: String) {
        *self.token.write() = Some(token);
    }

    fn clear(&self) {
        self.token.write().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("first".into());
        store.set("second".into());
        assert_eq!(store.get().as_deref(), Some("second"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_with_token() {
        let store = MemoryTokenStore::with_token("seed");
        assert_eq!(store.get().as_deref(), Some("seed"));
    }
}
