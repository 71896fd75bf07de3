// src/db/mod.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    PgPool,
};

use crate::{
    config::DbConfig,
    error::StoreError,
    models::{DailyKpi, MonthlyAggregate, YearMonth},
};

mod kpi;

pub use kpi::PgKpiStore;

/// Read side of the daily KPI table.
#[async_trait]
pub trait KpiStore: Send + Sync {
    /// Exact match on `day`; at most one row.
    async fn fetch_one_by_date(&self, day: NaiveDate) -> Result<Option<DailyKpi>, StoreError>;

    /// Every row in the month ordered by `day`, plus its totals.
    async fn fetch_month(
        &self,
        month: YearMonth,
    ) -> Result<(Vec<DailyKpi>, MonthlyAggregate), StoreError>;
}

pub fn connect_options(cfg: &DbConfig) -> PgConnectOptions {
    let ssl_mode = if cfg.ssl_insecure {
        PgSslMode::Require
    } else {
        PgSslMode::VerifyFull
    };

    let opts = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .database(&cfg.name)
        .username(&cfg.user)
        .password(&cfg.password)
        .ssl_mode(ssl_mode);

    match &cfg.ssl_root_cert {
        Some(path) => opts.ssl_root_cert(path),
        None => opts,
    }
}

/// Builds the pool lazily so the process can start while the database is
/// still coming up; failures surface per request as `StoreError::Unavailable`.
pub fn connect(cfg: &DbConfig) -> PgPool {
    if cfg.ssl_insecure {
        tracing::warn!("DB_SSL_INSECURE is set; database certificate is not verified");
    }

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_lazy_with(connect_options(cfg));

    tracing::info!(host = %cfg.host, port = cfg.port, db = %cfg.name, "postgres pool ready");
    pool
}
