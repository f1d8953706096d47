//! Extension trait for Depot to easily access the session context

use salvo_core::Depot;

use crate::context::RequestContext;
use crate::user::SessionUser;

const CONTEXT_KEY: &str = "silence.session.context";

/// Extension trait for Salvo's Depot to reach the current request's
/// session context and user
pub trait SessionDepotExt {
    /// The request's session context (a clone with shared state)
    fn session_context(&self) -> Option<RequestContext>;

    /// Snapshot of the current user, if the request is authenticated
    fn session_user(&self) -> Option<SessionUser>;
}

impl SessionDepotExt for Depot {
    fn session_context(&self) -> Option<RequestContext> {
        self.get::<RequestContext>(CONTEXT_KEY).ok().cloned()
    }

    fn session_user(&self) -> Option<SessionUser> {
        self.session_context().and_then(|ctx| ctx.current_user())
    }
}
