//! # Pintxopote API Server
//!
//! Serves the pintxopote HTTP API on top of PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! DB_URL=postgresql://localhost/pintxopote \
//! TOKEN_SECRET=$(openssl rand -hex 32) \
//! cargo run -p pintxopote-api
//! ```

use anyhow::Context;
use pintxopote_api::{
    app::{build_router, AppState},
    config::Config,
};
use pintxopote_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pintxopote_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Pintxopote API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    migrations::run_migrations(&db)
        .await
        .context("failed to run database migrations")?;

    let address = config.bind_address();
    let app = build_router(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
