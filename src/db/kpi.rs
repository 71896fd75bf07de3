// src/db/kpi.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{query, query_as, PgPool};

use super::KpiStore;
use crate::{
    error::StoreError,
    models::{DailyKpi, MonthlyAggregate, YearMonth},
};

// Casts keep decoding stable whether the columns are int4/int8/numeric.
const KPI_COLUMNS: &str = r#"
    day,
    attendance::int8      AS attendance,
    transactions::int8    AS transactions,
    items_sold::int8      AS items_sold,
    total_gross_gbp::float8 AS total_gross_gbp,
    all_four::int8        AS all_four,
    show_book::int8       AS show_book,
    comments
"#;

#[derive(Clone)]
pub struct PgKpiStore {
    pool: PgPool,
}

impl PgKpiStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KpiStore for PgKpiStore {
    async fn fetch_one_by_date(&self, day: NaiveDate) -> Result<Option<DailyKpi>, StoreError> {
        let sql = format!("SELECT {KPI_COLUMNS} FROM public.daily_kpis WHERE day = $1 LIMIT 1");
        let row = query_as::<_, DailyKpi>(&sql)
            .bind(day)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_month(
        &self,
        month: YearMonth,
    ) -> Result<(Vec<DailyKpi>, MonthlyAggregate), StoreError> {
        let (start, end) = month.bounds();

        // Rows and totals come from one snapshot. Dropping `tx` on any early
        // return rolls back and hands the connection back to the pool.
        let mut tx = self.pool.begin().await?;
        query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "SELECT {KPI_COLUMNS} FROM public.daily_kpis
             WHERE day >= $1 AND day < $2
             ORDER BY day ASC"
        );
        let rows = query_as::<_, DailyKpi>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&mut *tx)
            .await?;

        let summary = query_as::<_, MonthlyAggregate>(
            r#"
            SELECT COUNT(*)::int8                 AS days,
                   SUM(attendance)::int8          AS attendance_sum,
                   SUM(transactions)::int8        AS transactions_sum,
                   SUM(items_sold)::int8          AS items_sold_sum,
                   SUM(total_gross_gbp)::float8   AS total_gross_gbp_sum
            FROM public.daily_kpis
            WHERE day >= $1 AND day < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            year = month.year(),
            month = month.month(),
            rows = rows.len(),
            "monthly fetch"
        );
        Ok((rows, summary))
    }
}
