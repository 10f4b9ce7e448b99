//! # DevConnector API Server
//!
//! Serves the profile API backed by PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/devconnector \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p devconnector-api
//! ```

use devconnector_api::{
    app::{build_router, AppState},
    config::Config,
};
use devconnector_shared::db::{
    migrations::{migration_status, run_migrations},
    pool::{close_pool, create_pool},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devconnector_api=debug,devconnector_shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "DevConnector API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(&config.pool_config()).await?;
    run_migrations(&pool).await?;

    let status = migration_status(&pool).await?;
    tracing::info!(
        applied = status.applied_migrations,
        latest = ?status.latest_version,
        up_to_date = status.is_up_to_date,
        "Database schema ready"
    );

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
