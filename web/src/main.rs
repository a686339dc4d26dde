//! HelpHive server binary.
//!
//! Loads configuration from the environment, connects the Postgres pool,
//! runs migrations, and serves the HTTP API until interrupted.

use anyhow::Context;
use helphive_core::environment::SystemClock;
use helphive_postgres::{PostgresAccountStore, PostgresRequestStore, run_migrations};
use helphive_web::{AppState, Config, build_router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(
        Arc::new(PostgresRequestStore::new(pool.clone())),
        Arc::new(PostgresAccountStore::new(pool)),
        Arc::new(SystemClock),
    );
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
