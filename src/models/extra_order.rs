//! Extra order (snack counter) model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use validator::Validate;

use super::meal::LineItem;

/// Itemized purchase billed at its recorded total
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExtraOrder {
    pub id: i32,
    pub student_id: i32,
    #[schema(value_type = Vec<LineItem>)]
    pub items: Json<Vec<LineItem>>,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create extra order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExtraOrder {
    /// Order time (defaults to now)
    pub ordered_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "An order needs at least one item"), nested)]
    pub items: Vec<LineItem>,
}
