//! Extra order ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        extra_order::{CreateExtraOrder, ExtraOrder},
        meal::LedgerQuery,
    },
};

use super::AuthenticatedUser;

/// Extra orders of a student, newest first
#[utoipa::path(
    get,
    path = "/students/{id}/extra-orders",
    tag = "extra_orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Student ID"),
        LedgerQuery
    ),
    responses(
        (status = 200, description = "Extra orders", body = Vec<ExtraOrder>),
        (status = 404, description = "Student not found")
    )
)]
pub async fn list_extra_orders(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<Vec<ExtraOrder>>> {
    let student = state.services.students.get_by_id(id).await?;
    claims.require_read_student(student.id, &student.hostel)?;

    let orders = state.services.extra_orders.list(id, &query).await?;
    Ok(Json(orders))
}

/// Record an extra order
#[utoipa::path(
    post,
    path = "/students/{id}/extra-orders",
    tag = "extra_orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = CreateExtraOrder,
    responses(
        (status = 201, description = "Extra order recorded", body = ExtraOrder),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn create_extra_order(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateExtraOrder>,
) -> AppResult<(StatusCode, Json<ExtraOrder>)> {
    data.validate()?;

    let student = state.services.students.get_by_id(id).await?;
    claims.require_manage_hostel(&student.hostel)?;

    let order = state.services.extra_orders.create(&student, &data).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
