use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use jaothui_core::config::Config;
use jaothui_core::tracing::init_tracing;
use jaothui_farms::config::FarmsConfig;
use jaothui_farms::router::build_router;
use jaothui_farms::state::AppState;
use jaothui_farms_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FarmsConfig::from_env().context("load farms config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("apply migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db: Arc::new(db),
        lookup_strategy: config.farm_context_strategy,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.farms_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!(
        strategy = ?config.farm_context_strategy,
        "farms service listening on {http_addr}"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
