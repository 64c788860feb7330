//! Extra orders repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        bill::{BillWindow, ExtraTally},
        extra_order::{CreateExtraOrder, ExtraOrder},
        meal::lines_total,
    },
    services::billing::ExtraOrderLedger,
};

#[derive(Clone)]
pub struct ExtraOrdersRepository {
    pool: Pool<Postgres>,
}

impl ExtraOrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a student's extra orders in `[from, to)`, newest first
    pub async fn list_for_student(
        &self,
        student_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<ExtraOrder>> {
        let rows = sqlx::query_as::<_, ExtraOrder>(
            r#"
            SELECT * FROM extra_orders
            WHERE student_id = $1
              AND ($2::timestamptz IS NULL OR ordered_at >= $2)
              AND ($3::timestamptz IS NULL OR ordered_at < $3)
            ORDER BY ordered_at DESC
            "#,
        )
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record an extra order; total_amount is derived from the item lines
    pub async fn create(&self, student_id: i32, data: &CreateExtraOrder) -> AppResult<ExtraOrder> {
        let ordered_at = data.ordered_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, ExtraOrder>(
            r#"
            INSERT INTO extra_orders (student_id, items, total_amount, ordered_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(Json(&data.items))
        .bind(lines_total(&data.items)?)
        .bind(ordered_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl ExtraOrderLedger for ExtraOrdersRepository {
    async fn extra_totals(&self, student_ids: &[i32], window: &BillWindow) -> AppResult<Vec<ExtraTally>> {
        // Half-open: an order at exactly window.end is not billed
        let rows = sqlx::query_as::<_, ExtraTally>(
            r#"
            SELECT student_id, COALESCE(SUM(total_amount), 0) AS extra_total
            FROM extra_orders
            WHERE student_id = ANY($1)
              AND ordered_at >= $2
              AND ordered_at < $3
            GROUP BY student_id
            "#,
        )
        .bind(student_ids)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
