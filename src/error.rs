//! Session error types

use std::fmt;

/// Errors that can occur during session operations
///
/// Absence is never an error: a missing identifier, a missing backend
/// record or a missing current user resolves the operation as a benign
/// no-op result instead.
#[derive(Debug)]
pub enum SessionError {
    /// Error from the key-value backend (connectivity or command failure).
    /// Never retried internally; surfaced verbatim to the caller.
    Backend(String),
    /// Stored payload failed to parse; the record is unusable for this read
    MalformedRecord(String),
    /// Redis error (when redis-store feature is enabled)
    #[cfg(feature = "redis-store")]
    Redis(redis::RedisError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Backend(msg) => write!(f, "Session backend error: {}", msg),
            SessionError::MalformedRecord(msg) => write!(f, "Malformed session record: {}", msg),
            #[cfg(feature = "redis-store")]
            SessionError::Redis(e) => write!(f, "Redis error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(feature = "redis-store")]
impl From<redis::RedisError> for SessionError {
    fn from(err: redis::RedisError) -> Self {
        SessionError::Redis(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::MalformedRecord(err.to_string())
    }
}
