//! Data models for the mess server

pub mod bill;
pub mod extra_order;
pub mod meal;
pub mod student;
pub mod user;

// Re-export commonly used types
pub use bill::{BillItem, BillPeriod, BillRequest, BillSnapshot, GeneratedBill};
pub use extra_order::ExtraOrder;
pub use meal::{LineItem, MealRecord};
pub use student::{RosterEntry, Student};
pub use user::{Role, UserClaims};
