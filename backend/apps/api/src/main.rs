//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use accounts::application::{ReconcileWalletsUseCase, RequestContext, WalletService};
use accounts::{PgAccountStore, accounts_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

/// Upper bound for the startup wallet reconciliation
const RECONCILE_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    let accounts_config = config.accounts_config()?;
    if config.jwt.secret.is_none() {
        tracing::warn!("JWT_SECRET not set, signing tokens with a random per-process key");
    }
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_open_conns)
        .min_connections(
            config
                .database
                .max_idle_conns
                .min(config.database.max_open_conns),
        )
        .idle_timeout(config.database.max_idle_time)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let store = PgAccountStore::new(pool.clone());

    // Startup reconciliation: open wallets for users left without one
    // Errors here should not prevent server startup
    let repo = Arc::new(store.clone());
    let reconcile = ReconcileWalletsUseCase::new(repo.clone(), Arc::new(WalletService::new(repo)));
    match reconcile
        .execute(&RequestContext::with_timeout(RECONCILE_TIMEOUT))
        .await
    {
        Ok(created) => {
            tracing::info!(wallets_created = created, "Wallet reconciliation completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Wallet reconciliation failed, continuing anyway"
            );
        }
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/v1", accounts_router(store, accounts_config)?)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
