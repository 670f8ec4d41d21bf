//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in the initial
//! schema migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_RESIDENT: &str = "resident";
