//! Daily/Monthly KPI API.
//!
//! Read-only reporting over `public.daily_kpis`:
//! - `POST /daily`   one day's row, 404 when absent
//! - `POST /monthly` every row in a calendar month, optionally with totals
//! - `GET /healthz`  public liveness probe
//!
//! KPI routes require the configured API token, as `Authorization: Bearer`
//! or `X-API-Key`.

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use auth::ApiKey;
use db::KpiStore;

pub const SERVICE_NAME: &str = "Daily/Monthly KPI API";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KpiStore>,
    pub api_key: Arc<ApiKey>,
}

impl AppState {
    pub fn new(store: Arc<dyn KpiStore>, api_token: impl Into<String>) -> Self {
        Self { store, api_key: Arc::new(ApiKey::new(api_token)) }
    }
}
