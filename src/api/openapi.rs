//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bills, extra_orders, health, meals, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hostel Mess API",
        version = "1.0.0",
        description = "Hostel mess ledgers and monthly bill generation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bills
        bills::generate_bill,
        bills::export_bill,
        bills::list_bills,
        bills::get_bill,
        bills::delete_bill,
        // Students
        students::list_students,
        students::get_student,
        students::create_student,
        // Ledgers
        meals::list_meals,
        meals::create_meal,
        extra_orders::list_extra_orders,
        extra_orders::create_extra_order,
    ),
    components(
        schemas(
            // Bills
            crate::models::bill::BillPeriod,
            crate::models::bill::BillItem,
            crate::models::bill::GenerateBillRequest,
            crate::models::bill::ItemCharge,
            crate::models::bill::BillRow,
            crate::models::bill::GeneratedBill,
            crate::models::bill::BillSnapshot,
            crate::models::bill::BillHistoryQuery,
            // Students
            crate::models::student::Student,
            crate::models::student::CreateStudent,
            crate::models::student::RosterQuery,
            // Ledgers
            crate::models::meal::LineItem,
            crate::models::meal::MealRecord,
            crate::models::meal::CreateMealRecord,
            crate::models::meal::LedgerQuery,
            crate::models::extra_order::ExtraOrder,
            crate::models::extra_order::CreateExtraOrder,
            // Auth
            crate::models::user::Role,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bills", description = "Bill generation, export and history"),
        (name = "students", description = "Hostel rosters"),
        (name = "meals", description = "Meal ledger"),
        (name = "extra_orders", description = "Extra order ledger")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the secured paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
