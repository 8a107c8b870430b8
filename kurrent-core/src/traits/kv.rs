use crate::errors::StoreError;

/// Opaque durable string key-value store.
///
/// Reads fail open: a backend error on `get` degrades to `None` so callers
/// can always make forward progress. Writes fail loud: a `set` or `delete`
/// that cannot be persisted returns the error, because a swallowed write is
/// a silently lost measurement.
pub trait KvStore: Send + Sync {
    /// Read a value. Absent key or backend error → `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any prior one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
