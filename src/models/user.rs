//! Authenticated user claims and authorization checks

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Role carried in the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    /// Runs the mess of one hostel: rosters, ledgers and billing
    MessManager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::MessManager => "mess_manager",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "mess_manager" | "manager" => Ok(Role::MessManager),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// JWT claims for authenticated users. Tokens are issued by the
/// identity service; this server only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    /// Hostel the user belongs to (or manages)
    pub hostel: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Encode the claims as an HS256 token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the user's own hostel matches `hostel` (case-insensitive)
    pub fn belongs_to(&self, hostel: &str) -> bool {
        self.hostel
            .as_deref()
            .map(|own| own.trim().to_lowercase() == hostel.trim().to_lowercase())
            .unwrap_or(false)
    }

    /// Billing, rosters and ledgers of a hostel: its mess manager or an admin
    pub fn require_manage_hostel(&self, hostel: &str) -> Result<(), AppError> {
        if self.is_admin() || (self.role == Role::MessManager && self.belongs_to(hostel)) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Insufficient rights to manage hostel {}",
                hostel
            )))
        }
    }

    /// Read access to a student's records: the student, their mess manager, or an admin
    pub fn require_read_student(&self, student_id: i32, hostel: &str) -> Result<(), AppError> {
        if self.role == Role::Student && self.user_id == student_id {
            return Ok(());
        }
        self.require_manage_hostel(hostel)
    }

    /// Hostel the request targets: the explicit one, else the user's own
    pub fn resolve_hostel(&self, requested: Option<&str>) -> Option<String> {
        requested
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .or_else(|| self.hostel.clone())
    }
}
