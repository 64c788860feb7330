//! Bill generation, export and history endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        bill::{BillHistoryQuery, BillRequest, BillSnapshot, GenerateBillRequest, GeneratedBill},
        user::UserClaims,
    },
    services::export,
};

use super::AuthenticatedUser;

/// Validate the body, defaulting the hostel to the caller's own, and check
/// the caller may bill that hostel
fn bill_request(claims: &UserClaims, mut body: GenerateBillRequest) -> AppResult<BillRequest> {
    let hostel = claims.resolve_hostel(body.requested_hostel());
    body.hostel = hostel.map(Value::String);
    let request = BillRequest::try_from(body)?;
    claims.require_manage_hostel(&request.hostel)?;
    Ok(request)
}

/// Generate the bill of a hostel for a month or a date range
#[utoipa::path(
    post,
    path = "/bills/generate",
    tag = "bills",
    security(("bearer_auth" = [])),
    request_body = GenerateBillRequest,
    responses(
        (status = 200, description = "Computed bill", body = GeneratedBill),
        (status = 400, description = "Missing hostel, period or diet rate"),
        (status = 403, description = "Not a billing operator of this hostel"),
        (status = 404, description = "No students found in the hostel")
    )
)]
pub async fn generate_bill(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(body): Json<GenerateBillRequest>,
) -> AppResult<Json<GeneratedBill>> {
    let request = bill_request(&claims, body)?;
    let bill = state.services.billing.generate(&request).await?;
    Ok(Json(bill))
}

/// Generate the bill and download it as a CSV spreadsheet
#[utoipa::path(
    post,
    path = "/bills/export",
    tag = "bills",
    security(("bearer_auth" = [])),
    request_body = GenerateBillRequest,
    responses(
        (status = 200, description = "CSV attachment named {hostel}_{period}_Bill.csv", content_type = "text/csv"),
        (status = 400, description = "Missing hostel, period or diet rate"),
        (status = 404, description = "No students found in the hostel")
    )
)]
pub async fn export_bill(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(body): Json<GenerateBillRequest>,
) -> AppResult<impl IntoResponse> {
    let request = bill_request(&claims, body)?;
    let bill = state.services.billing.generate(&request).await?;

    let content = export::render_csv(&bill)?;
    let file_name = export::export_file_name(&bill.hostel, &bill.period);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.csv\"", file_name),
            ),
        ],
        content,
    ))
}

/// Bill history of a hostel, newest first
#[utoipa::path(
    get,
    path = "/bills",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(BillHistoryQuery),
    responses(
        (status = 200, description = "Bill snapshots", body = Vec<BillSnapshot>)
    )
)]
pub async fn list_bills(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BillHistoryQuery>,
) -> AppResult<Json<Vec<BillSnapshot>>> {
    let hostel = claims
        .resolve_hostel(query.hostel.as_deref())
        .ok_or_else(|| AppError::Validation("hostel scope required".to_string()))?;
    claims.require_manage_hostel(&hostel)?;

    let bills = state.services.billing.history(&hostel).await?;
    Ok(Json(bills))
}

/// Get one bill snapshot
#[utoipa::path(
    get,
    path = "/bills/{id}",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bill snapshot ID")),
    responses(
        (status = 200, description = "Bill snapshot", body = BillSnapshot),
        (status = 404, description = "Bill not found")
    )
)]
pub async fn get_bill(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BillSnapshot>> {
    let snapshot = state.services.billing.get_snapshot(id).await?;
    claims.require_manage_hostel(&snapshot.hostel)?;
    Ok(Json(snapshot))
}

/// Delete a bill snapshot
#[utoipa::path(
    delete,
    path = "/bills/{id}",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bill snapshot ID")),
    responses(
        (status = 204, description = "Bill deleted"),
        (status = 403, description = "Not a billing operator of this hostel"),
        (status = 404, description = "Bill not found")
    )
)]
pub async fn delete_bill(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let snapshot = state.services.billing.get_snapshot(id).await?;
    claims.require_manage_hostel(&snapshot.hostel)?;

    state.services.billing.delete_snapshot(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
