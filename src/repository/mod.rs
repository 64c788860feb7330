//! Repository layer for database operations

pub mod bills;
pub mod extra_orders;
pub mod meals;
pub mod students;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub students: students::StudentsRepository,
    pub meals: meals::MealsRepository,
    pub extra_orders: extra_orders::ExtraOrdersRepository,
    pub bills: bills::BillsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            students: students::StudentsRepository::new(pool.clone()),
            meals: meals::MealsRepository::new(pool.clone()),
            extra_orders: extra_orders::ExtraOrdersRepository::new(pool.clone()),
            bills: bills::BillsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
