//! Personal Vault - Server Entry Point
//!
//! Serves the vault's JSON API and the browser assets from `public/`.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the key cipher and the operator credentials
//! 3. Open the record store and session store (PostgreSQL, or memory when
//!    `DATABASE_URL` is unset)
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use std::sync::Arc;

use anyhow::Context;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use personal_vault::{
    app::{self, AppState, SessionSettings},
    config::Config,
    crypto::KeyCipher,
    db,
    services::auth_service::Credentials,
    store::{MemoryVaultStore, PgVaultStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let cipher =
        KeyCipher::from_config_value(&config.encryption_key).context("invalid ENCRYPTION_KEY")?;
    let credentials = Credentials::new(config.vault_email, config.vault_password)
        .context("invalid operator credentials")?;

    let settings =
        SessionSettings::from_hours(config.cookie_secure, config.session_inactivity_hours);
    let public_dir = config.public_dir.as_path();

    let router = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            let session_store = PostgresStore::new(pool.clone());
            session_store.migrate().await?;

            let state = AppState::new(Arc::new(PgVaultStore::new(pool)), cipher, credentials);
            app::build_router(
                state,
                app::session_layer(session_store, settings),
                Some(public_dir),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; records and sessions are kept in memory");

            let state = AppState::new(Arc::new(MemoryVaultStore::new()), cipher, credentials);
            app::build_router(
                state,
                app::session_layer(MemoryStore::default(), settings),
                Some(public_dir),
            )
        }
    };

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
