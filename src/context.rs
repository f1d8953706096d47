//! Request-context contract consumed by the session store

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::user::SessionUser;

/// Pending change to the client-visible identifier, applied to the HTTP
/// response by the plumbing layer after the request has run
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundIdentifier {
    /// Nothing to apply
    None,
    /// Set the identifier cookie with the given expiry timestamp
    Set {
        value: String,
        expires_at: DateTime<Utc>,
    },
    /// Clear the identifier cookie
    Clear,
}

/// Contract between the session store and the surrounding request layer
///
/// Implementations use interior mutability so a context can be shared
/// with downstream request handlers; the store never holds a borrow
/// across a backend call.
pub trait SessionContext: Send + Sync {
    /// The inbound session identifier, already resolved from the
    /// configured source (cookie value or query parameter)
    fn identifier_read(&self) -> Option<String>;

    /// Record an outbound identifier write with its expiry timestamp
    fn identifier_write(&self, value: &str, expires_at: DateTime<Utc>);

    /// Record an outbound identifier clear
    fn identifier_clear(&self);

    /// Snapshot of the current user, if any
    fn user(&self) -> Option<SessionUser>;

    /// Install or replace the current user
    fn set_user(&self, user: SessionUser);

    /// Remove and return the current user
    fn take_user(&self) -> Option<SessionUser>;
}

struct ContextInner {
    identifier: Option<String>,
    user: Option<SessionUser>,
    outbound: OutboundIdentifier,
}

/// Per-request context with shared state
///
/// Cloning yields a handle onto the same request's state, so the handler
/// and the route code observe each other's changes.
pub struct RequestContext {
    inner: Arc<RwLock<ContextInner>>,
}

impl RequestContext {
    /// Create a context for a request carrying the given identifier
    pub fn new(identifier: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ContextInner {
                identifier,
                user: None,
                outbound: OutboundIdentifier::None,
            })),
        }
    }

    /// The pending outbound identifier change
    pub fn outbound(&self) -> OutboundIdentifier {
        self.inner.read().outbound.clone()
    }

    /// Snapshot of the current user (same as the trait accessor, usable
    /// without importing the trait)
    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner.read().user.clone()
    }
}

impl SessionContext for RequestContext {
    fn identifier_read(&self) -> Option<String> {
        self.inner.read().identifier.clone()
    }

    fn identifier_write(&self, value: &str, expires_at: DateTime<Utc>) {
        self.inner.write().outbound = OutboundIdentifier::Set {
            value: value.to_string(),
            expires_at,
        };
    }

    fn identifier_clear(&self) {
        self.inner.write().outbound = OutboundIdentifier::Clear;
    }

    fn user(&self) -> Option<SessionUser> {
        self.inner.read().user.clone()
    }

    fn set_user(&self, user: SessionUser) {
        self.inner.write().user = Some(user);
    }

    fn take_user(&self) -> Option<SessionUser> {
        self.inner.write().user.take()
    }
}

impl Clone for RequestContext {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("RequestContext")
            .field("identifier", &inner.identifier)
            .field("user", &inner.user)
            .field("outbound", &inner.outbound)
            .finish()
    }
}
