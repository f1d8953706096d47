//! In-memory backend
//!
//! This is primarily for development and testing.
//! For production, use RedisBackend or another shared store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::SessionBackend;
use crate::error::SessionError;

struct StoredValue {
    value: String,
    expires_at: Instant,
}

/// In-memory expiring key-value store
///
/// Warning: not suitable for production use because:
/// - Records are lost on server restart
/// - Records are not shared across multiple server instances
/// - Memory usage grows with the number of live sessions
pub struct MemoryBackend {
    records: Arc<RwLock<HashMap<String, StoredValue>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drop records whose TTL has elapsed
    pub fn cleanup_expired(&self) {
        let mut records = self.records.write();
        let now = Instant::now();
        records.retain(|_, stored| stored.expires_at > now);
    }

    /// Number of live (unexpired) records
    pub fn len(&self) -> usize {
        self.cleanup_expired();
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryBackend {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

#[async_trait]
impl SessionBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let records = self.records.read();

        match records.get(key) {
            Some(stored) if stored.expires_at > Instant::now() => {
                Ok(Some(stored.value.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let stored = StoredValue {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.records.write().insert(key.to_string(), stored);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let mut records = self.records.write();
        let now = Instant::now();
        // A lapsed entry counts as absent even before cleanup sweeps it
        if let Some(stored) = records.get_mut(key) {
            if stored.expires_at > now {
                stored.expires_at = now + Duration::from_secs(ttl_secs);
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.records.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let backend = MemoryBackend::new();

        backend.set("sid", "payload", 60).await.unwrap();
        assert_eq!(backend.get("sid").await.unwrap().as_deref(), Some("payload"));

        backend.delete("sid").await.unwrap();
        assert_eq!(backend.get("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn zero_ttl_is_immediately_expired() {
        let backend = MemoryBackend::new();

        backend.set("sid", "payload", 0).await.unwrap();
        assert_eq!(backend.get("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expire_can_shorten_a_live_key() {
        let backend = MemoryBackend::new();

        backend.set("sid", "payload", 60).await.unwrap();
        backend.expire("sid", 0).await.unwrap();
        assert_eq!(backend.get("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expire_does_not_revive_a_lapsed_key() {
        let backend = MemoryBackend::new();

        backend.set("sid", "payload", 0).await.unwrap();
        backend.expire("sid", 60).await.unwrap();
        assert_eq!(backend.get("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expire_and_delete_on_absent_key_succeed() {
        let backend = MemoryBackend::new();

        backend.expire("missing", 60).await.unwrap();
        backend.delete("missing").await.unwrap();
    }

    #[tokio::test]
    async fn cleanup_drops_lapsed_records() {
        let backend = MemoryBackend::new();

        backend.set("a", "1", 0).await.unwrap();
        backend.set("b", "2", 60).await.unwrap();
        backend.cleanup_expired();
        assert_eq!(backend.len(), 1);
    }
}
