// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use daily_kpi_api::{config::Config, db, routes, AppState, SERVICE_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // Missing secrets stop us here, before anything listens.
    let cfg = Config::from_env().context("invalid configuration")?;

    let pool = db::connect(&cfg.db);
    let state = AppState::new(Arc::new(db::PgKpiStore::new(pool)), cfg.api_token.clone());
    let app = routes::router(state, &cfg);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        %addr,
        origins = ?cfg.allowed_origins,
        "listening"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
