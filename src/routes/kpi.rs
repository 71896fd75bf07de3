// src/routes/kpi.rs

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{
    error::{AppError, Result},
    models::{DailyKpi, DailyRequest, MonthlyRequest, MonthlyResponse},
    AppState,
};
use super::validate;

pub const NO_DATA_FOR_DATE: &str = "No data for that date.";

/// POST /daily
pub async fn get_daily(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DailyRequest>, JsonRejection>,
) -> Result<Json<DailyKpi>> {
    let body = validate::body(payload)?;
    let day = validate::iso_date(&body.date)?;

    let row = state.store.fetch_one_by_date(day).await?;
    match row {
        Some(row) => Ok(Json(row)),
        None => {
            tracing::debug!(%day, "no kpi row");
            Err(AppError::NotFound(NO_DATA_FOR_DATE))
        }
    }
}

/// POST /monthly
pub async fn get_monthly(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MonthlyRequest>, JsonRejection>,
) -> Result<Json<MonthlyResponse>> {
    let body = validate::body(payload)?;
    let month = validate::year_month(body.year, body.month)?;

    let (rows, summary) = state.store.fetch_month(month).await?;
    Ok(Json(MonthlyResponse {
        year: month.year(),
        month: month.month(),
        rows,
        summary: body.include_summary.then_some(summary),
    }))
}
