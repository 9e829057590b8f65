//! Key-value store trait definition.

use crate::error::StoreResult;
use std::sync::Arc;

/// A synchronous string key-value store.
///
/// Stores are **opaque string maps**. LocalTable owns the interpretation of
/// values; a store never parses what it holds.
///
/// # Invariants
///
/// - `get` returns exactly the value most recently passed to `set` for that key
/// - `set` replaces the whole value; readers never observe a partial value
/// - `remove` on an absent key is a no-op, not an error
/// - Stores must be `Send + Sync` and use interior locking
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For persistent storage
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. On error the
    /// previous value is left in place.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key` and its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Returns true if a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn has(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Returns all keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn has(&self, key: &str) -> StoreResult<bool> {
        (**self).has(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}
