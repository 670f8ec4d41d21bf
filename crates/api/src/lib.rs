//! Condominium management API server library.
//!
//! Exposes config, state, error handling, extractors and routes so the
//! binary entrypoint and the integration tests build the same application.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
