//! Meal ledger service

use crate::{
    error::AppResult,
    models::{
        meal::{CreateMealRecord, LedgerQuery, MealRecord},
        student::Student,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MealsService {
    repository: Repository,
}

impl MealsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Meal records of a student, optionally limited to a date range
    pub async fn list(&self, student_id: i32, query: &LedgerQuery) -> AppResult<Vec<MealRecord>> {
        let (from, to) = query.bounds()?;
        self.repository.meals.list_for_student(student_id, from, to).await
    }

    /// Record a served meal for a student already loaded by the caller
    pub async fn create(&self, student: &Student, data: &CreateMealRecord) -> AppResult<MealRecord> {
        self.repository.meals.create(student.id, data).await
    }
}
