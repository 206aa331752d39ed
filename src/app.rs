//! Shared state and router construction.
//!
//! The router is built here rather than in `main` so integration tests can run the
//! exact same routes against an in-memory store.

use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{SameSite, time},
};

use crate::{
    crypto::KeyCipher, handlers, middleware, services::auth_service::Credentials,
    store::VaultStore,
};

/// State shared with every handler via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VaultStore>,
    pub cipher: KeyCipher,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(store: Arc<dyn VaultStore>, cipher: KeyCipher, credentials: Credentials) -> Self {
        Self {
            store,
            cipher,
            credentials: Arc::new(credentials),
        }
    }
}

/// Cookie settings for the session layer.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub secure: bool,
    pub inactivity: Duration,
}

impl SessionSettings {
    /// Longest accepted inactivity window, 400 days.
    pub const MAX_INACTIVITY: Duration = Duration::from_secs(400 * 24 * 60 * 60);

    /// Settings from the configured hours. Values past [`Self::MAX_INACTIVITY`]
    /// are clamped so the cookie expiry date stays representable.
    pub fn from_hours(secure: bool, inactivity_hours: u64) -> Self {
        let inactivity = Duration::from_secs(inactivity_hours.saturating_mul(60 * 60));
        Self {
            secure,
            inactivity: inactivity.min(Self::MAX_INACTIVITY),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secure: false,
            inactivity: Duration::from_secs(60 * 60 * 24 * 7),
        }
    }
}

/// Wrap a session store in the cookie-managing layer.
pub fn session_layer<S>(store: S, settings: SessionSettings) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    let inactivity = time::Duration::try_from(settings.inactivity)
        .unwrap_or_else(|_| time::Duration::days(7));

    SessionManagerLayer::new(store)
        .with_secure(settings.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(inactivity))
}

/// Build the HTTP router.
///
/// # Routes
///
/// - Public: `/api/login`, `/api/logout`, `/api/auth-status`, `/health`
/// - Session-guarded: `/api/keys…`, `/api/hackathons…`
/// - Fallback: files from `public_dir`, or its `index.html` for unknown paths
pub fn build_router<S>(
    state: AppState,
    sessions: SessionManagerLayer<S>,
    public_dir: Option<&Path>,
) -> Router
where
    S: SessionStore + Clone,
{
    // Routes that require an authenticated session
    let guarded_routes = Router::new()
        .route(
            "/api/keys",
            get(handlers::keys::list_keys).post(handlers::keys::create_key),
        )
        .route("/api/keys/{id}", delete(handlers::keys::delete_key))
        .route(
            "/api/hackathons",
            get(handlers::hackathons::list_hackathons)
                .post(handlers::hackathons::create_hackathon),
        )
        .route(
            "/api/hackathons/{id}",
            put(handlers::hackathons::update_hackathon)
                .delete(handlers::hackathons::delete_hackathon),
        )
        .route_layer(axum_middleware::from_fn(
            middleware::auth::require_session,
        ));

    let mut app = Router::new()
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/auth-status", get(handlers::auth::auth_status))
        .route("/health", get(handlers::health::health_check))
        .merge(guarded_routes);

    if let Some(dir) = public_dir {
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).fallback(index));
    }

    app.layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
