//! Meal records repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        bill::{BillWindow, DietTally},
        meal::{lines_total, CreateMealRecord, MealRecord},
    },
    services::billing::MealLedger,
};

#[derive(Clone)]
pub struct MealsRepository {
    pool: Pool<Postgres>,
}

impl MealsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a student's meal records in `[from, to)`, newest first
    pub async fn list_for_student(
        &self,
        student_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<MealRecord>> {
        let rows = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT * FROM meal_records
            WHERE student_id = $1
              AND ($2::timestamptz IS NULL OR served_at >= $2)
              AND ($3::timestamptz IS NULL OR served_at < $3)
            ORDER BY served_at DESC
            "#,
        )
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record a served meal; total_cost is derived from the item lines
    pub async fn create(&self, student_id: i32, data: &CreateMealRecord) -> AppResult<MealRecord> {
        let served_at = data.served_at.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, MealRecord>(
            r#"
            INSERT INTO meal_records (student_id, served_at, diet_count, items, total_cost)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(served_at)
        .bind(data.diet_count)
        .bind(Json(&data.items))
        .bind(lines_total(&data.items)?)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl MealLedger for MealsRepository {
    async fn diet_counts(&self, student_ids: &[i32], window: &BillWindow) -> AppResult<Vec<DietTally>> {
        // Closed interval on both ends
        let rows = sqlx::query_as::<_, DietTally>(
            r#"
            SELECT student_id, COALESCE(SUM(diet_count), 0)::bigint AS diet_count
            FROM meal_records
            WHERE student_id = ANY($1)
              AND served_at >= $2
              AND served_at <= $3
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
