//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod settings;

use anyhow::Context;
use auth::{AuthAppState, BootstrapInput, BootstrapOutcome, BootstrapUseCase, PgAdminRepository};
use content::{ContentAppState, PgContentRepository};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

const SCHEMA: &str = include_str!("schema.sql");

async fn apply_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to apply database schema")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env().context("Invalid configuration")?;
    tracing::info!(?settings, "Settings loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    apply_schema(&pool).await?;

    tracing::info!("Schema applied");

    // Auth state; a short SECRET_KEY is fatal here
    let mut auth_state = AuthAppState::new(
        PgAdminRepository::new(pool.clone()),
        settings.auth_config(),
        false,
    )
    .context("Invalid auth configuration")?;

    let outcome = BootstrapUseCase::new(auth_state.repo.clone(), auth_state.config.clone())
        .execute(BootstrapInput {
            username: settings.admin_username.clone(),
            password: settings.admin_password.clone(),
            email: settings.admin_email.clone(),
            reset_password: settings.admin_password_reset,
        })
        .await
        .context("Admin bootstrap failed")?;
    auth_state.admin_enabled = outcome.admin_enabled();

    if outcome == BootstrapOutcome::Disabled {
        tracing::warn!("Running without an admin account; admin routes will reject every request");
    }

    let content_state = ContentAppState::new(PgContentRepository::new(pool));

    let app = app::build_app(auth_state, content_state, &settings.cors_origins());

    // Start server
    let addr: SocketAddr = settings.bind_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
