// src/models/mod.rs

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ───────────────────────────────────────
// Stored rows
// ───────────────────────────────────────

/// One row of `public.daily_kpis`. Nulls stay `None` all the way to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailyKpi {
    pub day: NaiveDate,
    pub attendance: Option<i64>,
    pub transactions: Option<i64>,
    pub items_sold: Option<i64>,
    pub total_gross_gbp: Option<f64>,
    pub all_four: Option<i64>,
    pub show_book: Option<i64>,
    pub comments: Option<String>,
}

/// Month totals. A sum is `None` when no row in the month had a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MonthlyAggregate {
    pub days: i64,
    pub attendance_sum: Option<i64>,
    pub transactions_sum: Option<i64>,
    pub items_sold_sum: Option<i64>,
    pub total_gross_gbp_sum: Option<f64>,
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Half-open `[first day, first day of next month)`.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        let next = self
            .first
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        (self.first, next)
    }
}

// ───────────────────────────────────────
// Request / response bodies
// ───────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DailyRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyRequest {
    pub year: i64,
    pub month: i64,
    #[serde(default)]
    pub include_summary: bool,
}

#[derive(Debug, Serialize)]
pub struct MonthlyResponse {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<DailyKpi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MonthlyAggregate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, attendance: Option<i64>, gross: Option<f64>) -> DailyKpi {
        DailyKpi {
            day: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            attendance,
            transactions: None,
            items_sold: Some(1),
            total_gross_gbp: gross,
            all_four: None,
            show_book: None,
            comments: None,
        }
    }

    #[test]
    fn year_month_bounds_roll_over_december() {
        let ym = YearMonth::new(2100, 12).unwrap();
        let (start, end) = ym.bounds();
        assert_eq!(start, NaiveDate::from_ymd_opt(2100, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2101, 1, 1).unwrap());
    }

    #[test]
    fn year_month_rejects_month_zero() {
        assert!(YearMonth::new(2025, 0).is_none());
        assert!(YearMonth::new(2025, 13).is_none());
    }

    #[test]
    fn nulls_serialize_as_null() {
        let json = serde_json::to_value(row(5, None, Some(1234.5))).unwrap();
        assert_eq!(json["day"], "2025-09-05");
        assert!(json["attendance"].is_null());
        assert!(json["comments"].is_null());
        assert_eq!(json["total_gross_gbp"], 1234.5);
    }
}
