//! Basic demo using the in-memory backend with cookie identification

use std::sync::OnceLock;

use salvo::prelude::*;
use silence_session::{
    new_session_id, MemoryBackend, SessionConfig, SessionContext, SessionDepotExt, SessionHandler,
    SessionStore,
};

static STORE: OnceLock<SessionStore<MemoryBackend>> = OnceLock::new();

fn store() -> &'static SessionStore<MemoryBackend> {
    STORE.get().expect("store initialized in main")
}

#[handler]
async fn index(depot: &mut Depot) -> String {
    match depot.session_user() {
        Some(user) if user.is_login() => format!(
            "Logged in as {} (session {}, remember: {})",
            user.get::<String>("name").unwrap_or_default(),
            user.session_id(),
            user.remember(),
        ),
        _ => "Not logged in".to_string(),
    }
}

#[handler]
async fn login(req: &mut Request, depot: &mut Depot) -> String {
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
    user.set_session_id(new_session_id());
    user.set("name", &name);
    ctx.set_user(user);

    match store().login(&ctx, remember).await {
        Ok(true) => format!("Welcome, {}!", name),
        Ok(false) => "Nothing to log in".to_string(),
        Err(e) => format!("Login failed: {}", e),
    }
}

#[handler]
async fn logout(depot: &mut Depot) -> String {
    let ctx = depot
        .session_context()
        .expect("session middleware installed");

    match store().logout(&ctx).await {
        Ok(true) => "Logged out".to_string(),
        Ok(false) => "No session to log out".to_string(),
        Err(e) => format!("Logout failed: {}", e),
    }
}

#[tokio::main]
async fn main() {
    // Set up logging
    tracing_subscriber::fmt::init();

    let config = SessionConfig::default();
    let store = SessionStore::new(MemoryBackend::new(), config);
    let session_handler = SessionHandler::new(store.clone());
    STORE.set(store).ok();

    // Build router
    let router = Router::new()
        .hoop(session_handler)
        .get(index)
        .push(Router::with_path("login").get(login))
        .push(Router::with_path("logout").get(logout));

    // Start server
    let acceptor = TcpListener::new("127.0.0.1:5800").bind().await;
    println!("Server running at http://127.0.0.1:5800");
    println!("Try these endpoints:");
    println!("  GET /                         - Who am I");
    println!("  GET /login?name=alice         - Log in (30 minute session)");
    println!("  GET /login?name=bob&remember=1 - Log in for 14 days");
    println!("  GET /logout                   - Log out");

    Server::new(acceptor).serve(router).await;
}
