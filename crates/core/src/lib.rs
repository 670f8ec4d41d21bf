//! Domain rules for the condominium backend.
//!
//! This crate has no internal dependencies so the rules can be shared by the
//! repository layer, the HTTP layer and tests.

pub mod announcement;
pub mod broadcast;
pub mod error;
pub mod pagination;
pub mod reservation;
pub mod roles;
pub mod types;
pub mod validation;
pub mod visitor;
pub mod work_order;
