//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO carrying the frontend's field names
//! - Where listings join reference data, a flat `*DetailRow` and the nested
//!   `*Detail` shape it is composed into

pub mod activity;
pub mod announcement;
pub mod common_area;
pub mod dashboard;
pub mod provider;
pub mod reservation;
pub mod resident;
pub mod session;
pub mod unit;
pub mod user;
pub mod visitor;
pub mod work_order;
