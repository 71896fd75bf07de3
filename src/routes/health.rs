// src/routes/health.rs

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResp { pub ok: bool }

pub async fn healthz() -> Json<HealthResp> {
    Json(HealthResp { ok: true })
}
