//! # TaskDeck API Server
//!
//! This is the TaskDeck API server: registration, login, and per-user
//! task management over JSON/HTTP.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Auth endpoints (register, login, me) with Argon2id password hashing
//! - Stateless bearer-token sessions (HS256, 7-day expiry)
//! - Task CRUD scoped to the authenticated user
//! - JSON-file storage with serialized mutations
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p taskdeck-api
//! ```

use taskdeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskdeck_shared::store::{FileBackend, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskDeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Make sure the data directory and collection files exist
    let backend = FileBackend::new(&config.storage.data_dir);
    backend.init().await?;
    tracing::info!(data_dir = %config.storage.data_dir.display(), "storage initialized");

    let bind_address = config.bind_address();
    let state = AppState::new(Store::new(backend), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
