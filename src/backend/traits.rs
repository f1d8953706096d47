//! Key-value backend trait

use async_trait::async_trait;

use crate::error::SessionError;

/// Contract for the expiring key-value store behind the session store
///
/// Keys are the bare session identifier; values are the JSON-serialized
/// session record. Every operation is a single asynchronous call and may
/// fail with a backend-level error; failures are never retried here.
#[async_trait]
pub trait SessionBackend: Send + Sync + 'static {
    /// Fetch the value at `key`
    ///
    /// Returns None if the key is absent or has expired
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write `value` at `key` with the given TTL, overwriting any
    /// preexisting value and TTL
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError>;

    /// Reset the TTL countdown on `key` without touching its value
    ///
    /// Refreshing an absent key is not an error
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), SessionError>;

    /// Remove `key`; deleting an absent key is a no-op success
    async fn delete(&self, key: &str) -> Result<(), SessionError>;
}
