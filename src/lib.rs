//! # silence-session
//!
//! Session lifecycle management backed by a remote expiring key-value
//! store (Redis by default).
//!
//! A request-handling layer authenticates a client across requests by an
//! opaque session identifier, carried in a cookie or a token query
//! parameter. The serialized user record is persisted under that
//! identifier and its TTL is renewed on every qualifying access, so
//! continued activity extends the login window while inactivity lets it
//! lapse. "Remember me" logins select a long-lived TTL that sticks to
//! the record across refreshes.
//!
//! ## Features
//!
//! - **Read-refresh touch**: each authenticated request extends the
//!   session TTL without rewriting the payload
//! - **Short and long TTL classes**: 30 minutes by default, 14 days for
//!   remembered sessions
//! - **Cookie or token identification**: configurable transport for the
//!   session identifier
//! - **Pluggable backends**: Redis or an in-memory store for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salvo::prelude::*;
//! use silence_session::{
//!     new_session_id, MemoryBackend, SessionConfig, SessionDepotExt, SessionHandler,
//!     SessionStore,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SessionStore::new(MemoryBackend::new(), SessionConfig::default());
//!     let session_handler = SessionHandler::new(store.clone());
//!
//!     let router = Router::new()
//!         .hoop(session_handler)
//!         .get(profile);
//!
//!     Server::new(TcpListener::bind("127.0.0.1:5800"))
//!         .serve(router)
//!         .await;
//! }
//!
//! #[handler]
//! async fn profile(depot: &mut Depot) -> String {
//!     match depot.session_user() {
//!         Some(user) if user.is_login() => format!("hello {:?}", user.get::<String>("name")),
//!         _ => "not logged in".to_string(),
//!     }
//! }
//! ```

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod handler;
pub mod store;
pub mod user;

pub use backend::{MemoryBackend, SessionBackend};
pub use config::{IdentifierSource, SessionConfig};
pub use context::{OutboundIdentifier, RequestContext, SessionContext};
pub use error::SessionError;
pub use factory::{PooledUserFactory, UserFactory};
pub use handler::{new_session_id, SessionHandler};
pub use store::SessionStore;
pub use user::{SessionRecord, SessionUser};

#[cfg(feature = "redis-store")]
pub use backend::RedisBackend;

/// Extension trait for Depot to easily access the session context
pub mod depot_ext;
pub use depot_ext::SessionDepotExt;
