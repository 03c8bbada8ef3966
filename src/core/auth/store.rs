//! Persisted token storage
//!
//! A narrow key/value port so the session manager never touches
//! `localStorage` directly and tests can swap in memory.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::error::StorageError;

/// Key under which the bearer token is persisted
pub const TOKEN_STORAGE_KEY: &str = "authenticationToken";

/// Synchronous key/value store that survives page reloads
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser hosts; server rendering uses the
/// inert `BrowserTokenStore`
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// `window.localStorage` backed store
///
/// Holds no handle: the storage object is looked up on every call so the
/// store stays `Send + Sync`. Outside the browser every read misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(feature = "hydrate")]
impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(feature = "hydrate"))]
impl TokenStore for BrowserTokenStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(TOKEN_STORAGE_KEY), None);

        store.set(TOKEN_STORAGE_KEY, "T").unwrap();
        assert_eq!(store.get(TOKEN_STORAGE_KEY), Some("T".to_string()));

        store.set(TOKEN_STORAGE_KEY, "T2").unwrap();
        assert_eq!(store.get(TOKEN_STORAGE_KEY), Some("T2".to_string()));

        store.remove(TOKEN_STORAGE_KEY);
        assert_eq!(store.get(TOKEN_STORAGE_KEY), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemoryTokenStore::with_entry("other", "x");
        store.remove(TOKEN_STORAGE_KEY);
        assert_eq!(store.get("other"), Some("x".to_string()));
    }

    #[cfg(not(feature = "hydrate"))]
    #[test]
    fn test_browser_store_is_inert_outside_browser() {
        let store = BrowserTokenStore;
        assert_eq!(store.get(TOKEN_STORAGE_KEY), None);
        assert_eq!(
            store.set(TOKEN_STORAGE_KEY, "T"),
            Err(StorageError::Unavailable)
        );
        store.remove(TOKEN_STORAGE_KEY);
    }
}
