//! Redis backend
//!
//! Records are stored at the bare session-identifier key:
//! - Value: JSON serialized session record
//! - TTL: short or long window, chosen by the record's remember flag

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::sync::Arc;

use super::SessionBackend;
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Redis-backed expiring key-value store
///
/// Holds a single long-lived [`ConnectionManager`] created once at startup
/// and shared by all operations. Reconnection is the manager's business;
/// command failures are surfaced to the caller unretried.
///
/// # Example
///
/// ```rust,ignore
/// use silence_session::RedisBackend;
///
/// let client = redis::Client::open("redis://127.0.0.1/")?;
/// let backend = RedisBackend::new(client).await?;
/// ```
pub struct RedisBackend {
    conn: Arc<ConnectionManager>,
}

impl RedisBackend {
    /// Create a backend from a Redis client
    pub async fn new(client: redis::Client) -> Result<Self, SessionError> {
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Create a backend from a connection string
    pub async fn from_url(url: &str) -> Result<Self, SessionError> {
        let client = redis::Client::open(url)
            .map_err(|e| SessionError::Backend(format!("Failed to create Redis client: {}", e)))?;
        Self::new(client).await
    }

    /// Create a backend from the host/port in a session configuration
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        tracing::debug!(host = %config.host, port = config.port, "connecting session backend");
        Self::from_url(&config.redis_url()).await
    }

    /// Create a backend from an existing connection manager
    pub fn from_connection_manager(conn: ConnectionManager) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }
}

impl Clone for RedisBackend {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[async_trait]
impl SessionBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let mut conn = (*self.conn).clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let mut conn = (*self.conn).clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let mut conn = (*self.conn).clone();
        // EXPIRE returns false when the key does not exist; an identifier
        // that lapsed between get and refresh is not an error
        let _: bool = conn.expire(key, ttl_secs as i64).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        let mut conn = (*self.conn).clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
