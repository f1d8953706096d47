//! Redis-backed demo using token identification
//!
//! The session identifier travels as a query parameter instead of a
//! cookie: clients append `?SILENCE_SESSION=<id>` to authenticated
//! requests. Useful for non-browser clients that do not keep a cookie
//! jar.

use std::sync::OnceLock;

use salvo::prelude::*;
use silence_session::{
    new_session_id, IdentifierSource, RedisBackend, SessionConfig, SessionContext, SessionDepotExt,
    SessionHandler, SessionStore,
};

static STORE: OnceLock<SessionStore<RedisBackend>> = OnceLock::new();

fn store() -> &'static SessionStore<RedisBackend> {
    STORE.get().expect("store initialized in main")
}

#[handler]
async fn whoami(depot: &mut Depot) -> Json<serde_json::Value> {
    match depot.session_user() {
        Some(user) if user.is_login() => Json(serde_json::json!({
            "login": true,
            "sessionId": user.session_id(),
            "remember": user.remember(),
            "attributes": user.attributes(),
        })),
        _ => Json(serde_json::json!({ "login": false })),
    }
}

#[handler]
async fn login(req: &mut Request, depot: &mut Depot) -> Json<serde_json::Value> {
    let ctx = depot
        .session_context()
        .expect("session middleware installed");

    let name = req
        .query::<String>("name")
        .unwrap_or_else(|| "anonymous".to_string());
    let remember = req
        .query::<String>("remember")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let mut user = store().factory().acquire();
    let session_id = new_session_id();
    user.set_session_id(session_id.clone());
    user.set("name", &name);
    ctx.set_user(user);

    match store().login(&ctx, remember).await {
        // Token mode sets no cookie; hand the identifier back to the client
        Ok(true) => Json(serde_json::json!({
            "login": true,
            "sessionId": session_id,
        })),
        Ok(false) => Json(serde_json::json!({ "login": false })),
        Err(e) => Json(serde_json::json!({ "login": false, "error": e.to_string() })),
    }
}

#[handler]
async fn logout(depot: &mut Depot) -> Json<serde_json::Value> {
    let ctx = depot
        .session_context()
        .expect("session middleware installed");

    match store().logout(&ctx).await {
        Ok(done) => Json(serde_json::json!({ "logout": done })),
        Err(e) => Json(serde_json::json!({ "logout": false, "error": e.to_string() })),
    }
}

#[tokio::main]
async fn main() {
    // Set up logging
    tracing_subscriber::fmt::init();

    let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("REDIS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6379);

    let config = SessionConfig::default()
        .with_identifier_source(IdentifierSource::Token)
        .with_host(host)
        .with_port(port);

    println!("Connecting to Redis at {}", config.redis_url());
    let backend = RedisBackend::connect(&config)
        .await
        .expect("Failed to connect to Redis");

    let store = SessionStore::new(backend, config);
    let session_handler = SessionHandler::new(store.clone());
    STORE.set(store).ok();

    // Build router
    let router = Router::new()
        .hoop(session_handler)
        .get(whoami)
        .push(Router::with_path("login").get(login))
        .push(Router::with_path("logout").get(logout));

    let port = std::env::var("PORT").unwrap_or_else(|_| "5800".to_string());
    let addr = format!("127.0.0.1:{}", port);

    // Start server
    let acceptor = TcpListener::new(addr.clone()).bind().await;
    println!("Server running at http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET /login?name=alice              - Log in, returns the session id");
    println!("  GET /?SILENCE_SESSION=<id>         - Who am I");
    println!("  GET /logout?SILENCE_SESSION=<id>   - Log out");

    Server::new(acceptor).serve(router).await;
}
