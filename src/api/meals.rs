//! Meal ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::meal::{CreateMealRecord, LedgerQuery, MealRecord},
};

use super::AuthenticatedUser;

/// Meal records of a student, newest first
#[utoipa::path(
    get,
    path = "/students/{id}/meals",
    tag = "meals",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID"),
        LedgerQuery
    ),
    responses(
        (status = 200, description = "Meal records", body = Vec<MealRecord>),
        (status = 404, description = "Student not found")
    )
)]
pub async fn list_meals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<Vec<MealRecord>>> {
    let student = state.services.students.get_by_id(id).await?;
    claims.require_read_student(student.id, &student.hostel)?;

    let meals = state.services.meals.list(id, &query).await?;
    Ok(Json(meals))
}

/// Record a served meal
#[utoipa::path(
    post,
    path = "/students/{id}/meals",
    tag = "meals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = CreateMealRecord,
    responses(
        (status = 201, description = "Meal recorded", body = MealRecord),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn create_meal(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateMealRecord>,
) -> AppResult<(StatusCode, Json<MealRecord>)> {
    data.validate()?;

    let student = state.services.students.get_by_id(id).await?;
    claims.require_manage_hostel(&student.hostel)?;

    let meal = state.services.meals.create(&student, &data).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}
