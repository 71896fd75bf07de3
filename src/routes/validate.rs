// src/routes/validate.rs

use axum::{extract::rejection::JsonRejection, Json};
use chrono::NaiveDate;

use crate::{error::AppError, models::YearMonth};

pub const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1900..=2100;
pub const MONTH_RANGE: std::ops::RangeInclusive<i64> = 1..=12;

/// Unwraps a JSON body, turning axum's rejection into a 400.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(b)| b).map_err(|e| {
        tracing::debug!(status = %e.status(), "rejected request body");
        AppError::Validation(format!("invalid request body: {}", e.body_text()))
    })
}

/// ISO calendar date, `YYYY-MM-DD` only.
pub fn iso_date(raw: &str) -> Result<NaiveDate, AppError> {
    // chrono's %Y takes a sign and its fields skip padding, so pin the shape first.
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid_date(raw));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid_date(raw))
}

fn invalid_date(raw: &str) -> AppError {
    AppError::Validation(format!("invalid date '{raw}': expected YYYY-MM-DD"))
}

pub fn year_month(year: i64, month: i64) -> Result<YearMonth, AppError> {
    if !YEAR_RANGE.contains(&year) {
        return Err(AppError::Validation(format!(
            "year must be between {} and {}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        )));
    }
    if !MONTH_RANGE.contains(&month) {
        return Err(AppError::Validation(format!(
            "month must be between {} and {}",
            MONTH_RANGE.start(),
            MONTH_RANGE.end()
        )));
    }
    YearMonth::new(year as i32, month as u32)
        .ok_or_else(|| AppError::Validation(format!("invalid month {year}-{month}")))
}
