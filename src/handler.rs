//! Salvo middleware wiring the session store into the request flow

use async_trait::async_trait;
use chrono::Utc;
use salvo_core::http::cookie::time::Duration as CookieDuration;
use salvo_core::http::cookie::Cookie;
use salvo_core::{Depot, FlowCtrl, Handler, Request, Response};
use uuid::Uuid;

use crate::backend::SessionBackend;
use crate::config::IdentifierSource;
use crate::context::{OutboundIdentifier, RequestContext, SessionContext};
use crate::store::SessionStore;

const CONTEXT_KEY: &str = "silence.session.context";

/// Generate a fresh opaque session identifier
///
/// Identifier generation sits outside the store itself; call this when
/// stamping a user before `login`.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Session middleware for Salvo
///
/// On each request it resolves the inbound identifier (cookie value or
/// query parameter, per configuration), touches the session store, parks
/// the request context in the depot for route handlers, and after the
/// chain has run applies any pending outbound cookie change and returns
/// the user record to the pool.
pub struct SessionHandler<B: SessionBackend> {
    store: SessionStore<B>,
}

impl<B: SessionBackend> SessionHandler<B> {
    pub fn new(store: SessionStore<B>) -> Self {
        Self { store }
    }

    /// The wrapped store, for route handlers that keep their own handle
    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    /// Read the session identifier from the configured source
    fn read_identifier(&self, req: &Request) -> Option<String> {
        let config = self.store.config();
        match config.identifier_source {
            IdentifierSource::Cookie => {
                let cookie_value = req.cookie(&config.session_key_name)?;
                let raw = cookie_value.value();

                // Cookie values are URL encoded
                let decoded = match urlencoding::decode(raw) {
                    Ok(d) => d.to_string(),
                    Err(_) => raw.to_string(),
                };
                if decoded.is_empty() {
                    None
                } else {
                    Some(decoded)
                }
            }
            IdentifierSource::Token => req.query::<String>(&config.session_key_name),
        }
    }

    /// Apply the pending identifier change to the response
    fn apply_outbound(&self, res: &mut Response, change: OutboundIdentifier) {
        let cookie_name = self.store.config().session_key_name.clone();
        match change {
            OutboundIdentifier::None => {}
            OutboundIdentifier::Set { value, expires_at } => {
                let max_age = (expires_at - Utc::now()).num_seconds().max(0);
                let cookie = Cookie::build((cookie_name, value))
                    .path("/")
                    .http_only(true)
                    .max_age(CookieDuration::seconds(max_age))
                    .build();
                res.add_cookie(cookie);
            }
            OutboundIdentifier::Clear => {
                let cookie = Cookie::build(cookie_name)
                    .path("/")
                    .max_age(CookieDuration::ZERO)
                    .build();
                res.add_cookie(cookie);
            }
        }
    }
}

impl<B: SessionBackend> Clone for SessionHandler<B> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

#[async_trait]
impl<B: SessionBackend> Handler for SessionHandler<B> {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let ctx = RequestContext::new(self.read_identifier(req));

        // A failed touch leaves the request unauthenticated rather than
        // failing it here; route handlers see no user
        if let Err(e) = self.store.touch(&ctx).await {
            tracing::error!("Failed to touch session: {}", e);
        }

        depot.insert(CONTEXT_KEY, ctx.clone());

        ctrl.call_next(req, depot, res).await;

        self.apply_outbound(res, ctx.outbound());

        if let Some(user) = ctx.take_user() {
            self.store.factory().release(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = new_session_id();
        let b = new_session_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
