//! The session store: identifier resolution, TTL policy and the
//! login/logout mutation protocol

use chrono::Utc;
use std::sync::Arc;

use crate::backend::SessionBackend;
use crate::config::SessionConfig;
use crate::context::SessionContext;
use crate::error::SessionError;
use crate::factory::{PooledUserFactory, UserFactory};
use crate::user::SessionRecord;

/// Session lifecycle manager over an expiring key-value backend
///
/// Each public operation is a single asynchronous unit of work with at
/// most one outstanding backend call at a time. Operations on the same
/// identifier issued concurrently from different requests are not
/// serialized here; the backend arbitrates by arrival order. Callers
/// needing stronger ordering must add an external lock keyed by
/// session identifier.
pub struct SessionStore<B: SessionBackend> {
    backend: Arc<B>,
    factory: Arc<dyn UserFactory>,
    config: SessionConfig,
}

impl<B: SessionBackend> SessionStore<B> {
    /// Create a store over the given backend with a default user pool
    pub fn new(backend: B, config: SessionConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            factory: Arc::new(PooledUserFactory::default()),
            config,
        }
    }

    /// Create a store with a custom user factory
    pub fn with_factory(backend: B, config: SessionConfig, factory: Arc<dyn UserFactory>) -> Self {
        Self {
            backend: Arc::new(backend),
            factory,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn factory(&self) -> &Arc<dyn UserFactory> {
        &self.factory
    }

    /// Resolve and refresh the session carried by a request
    ///
    /// Resolves the identifier from the context, fetches its record and
    /// refreshes the record's TTL, then populates the context's user.
    /// An absent identifier or absent record is a benign no-op that
    /// leaves the user unauthenticated. A record that fails to parse is
    /// a hard error.
    ///
    /// Read-refresh only: the payload itself is never rewritten. A failed
    /// TTL refresh is logged and the user is still resolved; the
    /// identifier remains valid, only the expiry window may be stale.
    pub async fn touch<C: SessionContext + ?Sized>(&self, ctx: &C) -> Result<(), SessionError> {
        let Some(session_id) = ctx.identifier_read() else {
            return Ok(());
        };
        tracing::debug!(%session_id, "try get session");

        let Some(payload) = self.backend.get(&session_id).await? else {
            return Ok(());
        };
        tracing::debug!(%session_id, %payload, "got session record");

        let record: SessionRecord = serde_json::from_str(&payload)?;

        let ttl = self.config.ttl_for(record.remember);
        if let Err(e) = self.backend.expire(&session_id, ttl).await {
            tracing::error!(%session_id, error = %e, "session TTL refresh failed");
        }

        let mut user = ctx.take_user().unwrap_or_else(|| self.factory.acquire());
        user.apply_record(&session_id, record);
        ctx.set_user(user);
        Ok(())
    }

    /// Persist the context's current user under its session identifier
    ///
    /// Returns `Ok(false)` without contacting the backend when the
    /// context carries no user. The `remember` argument selects the TTL
    /// class and is persisted with the record, so every later refresh
    /// keeps the same window until a new login overwrites it.
    ///
    /// In cookie mode a successful write also records the outbound
    /// cookie, expiring `ttl` seconds from now. A backend failure leaves
    /// the context untouched: no cookie, no login flag.
    pub async fn login<C: SessionContext + ?Sized>(
        &self,
        ctx: &C,
        remember: bool,
    ) -> Result<bool, SessionError> {
        let Some(mut user) = ctx.user() else {
            return Ok(false);
        };
        user.set_remember(remember);

        let session_id = user.session_id().to_string();
        let payload = serde_json::to_string(&user.to_record())?;
        let ttl = self.config.ttl_for(remember);
        tracing::debug!(%session_id, ttl, "try set session");

        self.backend.set(&session_id, &payload, ttl).await?;

        if self.config.uses_cookie() {
            let expires_at = Utc::now() + chrono::Duration::seconds(ttl as i64);
            ctx.identifier_write(&session_id, expires_at);
        }
        user.set_login(true);
        ctx.set_user(user);
        Ok(true)
    }

    /// Terminate the context's current session
    ///
    /// Returns `Ok(false)` when the context carries no user. The outbound
    /// cookie is cleared before the backend call: client-visible logout
    /// is eager, so a failed delete leaves the record behind until a
    /// retry or natural expiry while the client already lost its cookie.
    pub async fn logout<C: SessionContext + ?Sized>(&self, ctx: &C) -> Result<bool, SessionError> {
        let Some(mut user) = ctx.user() else {
            return Ok(false);
        };

        if self.config.uses_cookie() {
            ctx.identifier_clear();
        }

        let session_id = user.session_id().to_string();
        tracing::debug!(%session_id, "try delete session");
        self.backend.delete(&session_id).await?;

        user.set_login(false);
        ctx.set_user(user);
        Ok(true)
    }
}

impl<B: SessionBackend> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            factory: Arc::clone(&self.factory),
            config: self.config.clone(),
        }
    }
}
