//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- validates the Bearer token and loads the user.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated user.

pub mod auth;
pub mod rbac;
