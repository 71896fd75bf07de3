#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use daily_kpi_api::{
    config::{Config, DbConfig},
    db::KpiStore,
    error::StoreError,
    models::{DailyKpi, MonthlyAggregate, YearMonth},
    routes, AppState,
};

pub const TOKEN: &str = "test-token";

/// In-memory table that records how often it was queried.
#[derive(Default)]
pub struct MemoryStore {
    pub rows: Vec<DailyKpi>,
    pub calls: AtomicUsize,
    pub unavailable: bool,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<DailyKpi>) -> Arc<Self> {
        Arc::new(Self { rows, ..Default::default() })
    }

    pub fn down() -> Arc<Self> {
        Arc::new(Self { unavailable: true, ..Default::default() })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KpiStore for MemoryStore {
    async fn fetch_one_by_date(&self, day: NaiveDate) -> Result<Option<DailyKpi>, StoreError> {
        self.hit()?;
        Ok(self.rows.iter().find(|r| r.day == day).cloned())
    }

    async fn fetch_month(
        &self,
        month: YearMonth,
    ) -> Result<(Vec<DailyKpi>, MonthlyAggregate), StoreError> {
        self.hit()?;
        let (start, end) = month.bounds();
        let mut rows: Vec<DailyKpi> =
            self.rows.iter().filter(|r| start <= r.day && r.day < end).cloned().collect();
        rows.sort_by_key(|r| r.day);
        let summary = summarize(&rows);
        Ok((rows, summary))
    }
}

/// Same null-skipping totals the monthly SQL computes; a sum over
/// nothing but nulls stays `None`.
pub fn summarize(rows: &[DailyKpi]) -> MonthlyAggregate {
    fn total<T: std::iter::Sum<T>>(vals: Vec<T>) -> Option<T> {
        (!vals.is_empty()).then(|| vals.into_iter().sum())
    }

    MonthlyAggregate {
        days: rows.len() as i64,
        attendance_sum: total(rows.iter().filter_map(|r| r.attendance).collect()),
        transactions_sum: total(rows.iter().filter_map(|r| r.transactions).collect()),
        items_sold_sum: total(rows.iter().filter_map(|r| r.items_sold).collect()),
        total_gross_gbp_sum: total(rows.iter().filter_map(|r| r.total_gross_gbp).collect()),
    }
}

pub fn config() -> Config {
    Config {
        db: DbConfig {
            host: "127.0.0.1".into(),
            port: 5432,
            name: "postgres".into(),
            user: "postgres".into(),
            password: "unused".into(),
            ssl_root_cert: None,
            ssl_insecure: false,
            max_connections: 1,
        },
        api_token: TOKEN.into(),
        port: 0,
        allowed_origins: vec!["https://excel.officeapps.live.com".into()],
        request_timeout: Duration::from_secs(5),
    }
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    let cfg = config();
    routes::router(AppState::new(store, cfg.api_token.clone()), &cfg)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn kpi(date: NaiveDate, attendance: Option<i64>) -> DailyKpi {
    DailyKpi {
        day: date,
        attendance,
        transactions: Some(1),
        items_sold: None,
        total_gross_gbp: Some(10.0),
        all_four: None,
        show_book: None,
        comments: None,
    }
}

pub fn post(uri: &str, body: &str, auth: Option<(&str, &str)>) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some((name, value)) = auth {
        req = req.header(name, value);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

pub fn bearer(body: &str, uri: &str) -> Request<Body> {
    post(uri, body, Some(("authorization", "Bearer test-token")))
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}
