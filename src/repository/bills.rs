//! Bill snapshots repository

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::bill::{BillPeriod, BillSnapshot, BillSnapshotRow, NewBillSnapshot},
    services::billing::SnapshotStore,
};

#[derive(Clone)]
pub struct BillsRepository {
    pool: Pool<Postgres>,
}

impl BillsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for BillsRepository {
    async fn create_snapshot(&self, snapshot: &NewBillSnapshot) -> AppResult<BillSnapshot> {
        let (year, month, from, to) = match snapshot.period {
            BillPeriod::Month { year, month } => (Some(year), Some(month as i32), None, None),
            BillPeriod::Range { from, to } => (None, None, Some(from), Some(to)),
        };

        let row = sqlx::query_as::<_, BillSnapshotRow>(
            r#"
            INSERT INTO bill_snapshots
                (hostel, period_year, period_month, period_from, period_to,
                 diet_rate, bill_items, student_count, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&snapshot.hostel)
        .bind(year)
        .bind(month)
        .bind(from)
        .bind(to)
        .bind(snapshot.diet_rate)
        .bind(Json(&snapshot.bill_items))
        .bind(snapshot.student_count)
        .bind(snapshot.total_amount)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_snapshot(&self, id: i32) -> AppResult<BillSnapshot> {
        sqlx::query_as::<_, BillSnapshotRow>("SELECT * FROM bill_snapshots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bill with id {} not found", id)))?
            .try_into()
    }

    async fn list_snapshots(&self, hostel: &str, limit: i64) -> AppResult<Vec<BillSnapshot>> {
        let rows = sqlx::query_as::<_, BillSnapshotRow>(
            r#"
            SELECT * FROM bill_snapshots
            WHERE LOWER(hostel) = LOWER($1)
            ORDER BY generated_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(hostel.trim())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BillSnapshot::try_from).collect()
    }

    async fn delete_snapshot(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bill_snapshots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Bill with id {} not found", id)));
        }
        Ok(())
    }
}
