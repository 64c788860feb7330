//! Student model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Student record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub roll_no: String,
    pub name: String,
    pub room_no: String,
    /// Current hostel affiliation (also used for past billing periods)
    pub hostel: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Roster projection used by bill generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RosterEntry {
    pub id: i32,
    pub room_no: String,
    pub name: String,
    pub roll_no: String,
}

/// Create student request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub roll_no: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Room number is required"))]
    pub room_no: String,
    #[validate(length(min = 1, message = "Hostel is required"))]
    pub hostel: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Query parameters for the roster
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RosterQuery {
    /// Hostel (defaults to the caller's own hostel)
    pub hostel: Option<String>,
}
