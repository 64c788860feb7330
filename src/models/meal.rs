//! Meal ledger model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::bill::{amount_out_of_range, checked_total};
use crate::error::{AppError, AppResult};

/// One priced line on a meal record or an extra order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[schema(value_type = String, example = "15.00")]
    pub price: Decimal,
}

impl LineItem {
    pub fn cost(&self) -> AppResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.price)
            .ok_or_else(amount_out_of_range)
    }
}

/// Sum of `quantity × price` over all lines
pub fn lines_total(items: &[LineItem]) -> AppResult<Decimal> {
    checked_total(items.iter().map(LineItem::cost).collect::<AppResult<Vec<_>>>()?)
}

/// A meal served to a student
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MealRecord {
    pub id: i32,
    pub student_id: i32,
    pub served_at: DateTime<Utc>,
    /// Standard meal units, billed at the diet rate
    pub diet_count: i32,
    #[schema(value_type = Vec<LineItem>)]
    pub items: Json<Vec<LineItem>>,
    /// Cost of the extra items only
    #[schema(value_type = String)]
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Create meal record request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMealRecord {
    /// Service time (defaults to now)
    pub served_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0, message = "Diet count cannot be negative"))]
    pub diet_count: i32,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<LineItem>,
}

/// Date filter shared by the meal and extra-order listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LedgerQuery {
    /// Start date (YYYY-MM-DD), inclusive
    pub from_date: Option<String>,
    /// End date (YYYY-MM-DD), inclusive
    pub to_date: Option<String>,
}

impl LedgerQuery {
    /// Parse the optional bounds into `[start of from_date, start of the day after to_date)`
    pub fn bounds(&self) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let parse = |value: &Option<String>, field: &str| -> AppResult<Option<NaiveDate>> {
            value
                .as_deref()
                .map(|s| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .map_err(|_| AppError::Validation(format!("Invalid {} format", field)))
                })
                .transpose()
        };

        let from = parse(&self.from_date, "from_date")?
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
        let to = parse(&self.to_date, "to_date")?
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());

        Ok((from, to))
    }
}
