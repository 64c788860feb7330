//! Student roster endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudent, RosterQuery, Student},
};

use super::AuthenticatedUser;

/// Roster of a hostel, ordered by student id
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    params(RosterQuery),
    responses(
        (status = 200, description = "Students of the hostel", body = Vec<Student>),
        (status = 403, description = "Not a billing operator of this hostel")
    )
)]
pub async fn list_students(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RosterQuery>,
) -> AppResult<Json<Vec<Student>>> {
    let hostel = claims
        .resolve_hostel(query.hostel.as_deref())
        .ok_or_else(|| AppError::Validation("hostel scope required".to_string()))?;
    claims.require_manage_hostel(&hostel)?;

    let students = state.services.students.roster(&hostel).await?;
    Ok(Json(students))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Student>> {
    let student = state.services.students.get_by_id(id).await?;
    claims.require_read_student(student.id, &student.hostel)?;
    Ok(Json(student))
}

/// Register a student in a hostel
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    security(("bearer_auth" = [])),
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Roll number already registered")
    )
)]
pub async fn create_student(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    data.validate()?;
    claims.require_manage_hostel(&data.hostel)?;

    let student = state.services.students.create(&data).await?;
    Ok((StatusCode::CREATED, Json(student)))
}
