//! Students repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, RosterEntry, Student},
    services::billing::StudentDirectory,
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    /// All students of a hostel (case-insensitive), ordered by id
    pub async fn list_by_hostel(&self, hostel: &str) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE LOWER(hostel) = LOWER($1) ORDER BY id",
        )
        .bind(hostel.trim())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new student
    pub async fn create(&self, data: &CreateStudent) -> AppResult<Student> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM students WHERE roll_no = $1)",
        )
        .bind(data.roll_no.trim())
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Err(AppError::Conflict(format!(
                "Roll number {} is already registered",
                data.roll_no.trim()
            )));
        }

        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (roll_no, name, room_no, hostel, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.roll_no.trim())
        .bind(data.name.trim())
        .bind(data.room_no.trim())
        .bind(data.hostel.trim())
        .bind(&data.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl StudentDirectory for StudentsRepository {
    async fn roster(&self, hostel: &str) -> AppResult<Vec<RosterEntry>> {
        let rows = sqlx::query_as::<_, RosterEntry>(
            r#"
            SELECT id, room_no, name, roll_no
            FROM students
            WHERE LOWER(hostel) = LOWER($1)
            ORDER BY id
            "#,
        )
        .bind(hostel.trim())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
