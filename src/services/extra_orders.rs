//! Extra orders service

use crate::{
    error::AppResult,
    models::{
        extra_order::{CreateExtraOrder, ExtraOrder},
        meal::LedgerQuery,
        student::Student,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ExtraOrdersService {
    repository: Repository,
}

impl ExtraOrdersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, student_id: i32, query: &LedgerQuery) -> AppResult<Vec<ExtraOrder>> {
        let (from, to) = query.bounds()?;
        self.repository.extra_orders.list_for_student(student_id, from, to).await
    }

    pub async fn create(&self, student: &Student, data: &CreateExtraOrder) -> AppResult<ExtraOrder> {
        self.repository.extra_orders.create(student.id, data).await
    }
}
