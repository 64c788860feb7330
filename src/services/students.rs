//! Student roster service

use crate::{
    error::AppResult,
    models::student::{CreateStudent, Student},
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        self.repository.students.get_by_id(id).await
    }

    /// Students of a hostel, ordered by id
    pub async fn roster(&self, hostel: &str) -> AppResult<Vec<Student>> {
        self.repository.students.list_by_hostel(hostel).await
    }

    pub async fn create(&self, data: &CreateStudent) -> AppResult<Student> {
        let student = self.repository.students.create(data).await?;
        tracing::info!(id = student.id, hostel = %student.hostel, "Student registered");
        Ok(student)
    }
}
