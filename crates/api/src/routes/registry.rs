//! Route definitions for the condominium registry: units, residents,
//! providers and common areas.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{common_areas, providers, residents, units};
use crate::state::AppState;

/// Routes mounted at `/unidades`.
pub fn units_router() -> Router<AppState> {
    Router::new()
        .route("/", get(units::list).post(units::create))
        .route("/{id}", delete(units::delete))
}

/// Routes mounted at `/moradores`.
pub fn residents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(residents::list).post(residents::create))
        .route("/{id}", delete(residents::delete))
}

/// Routes mounted at `/prestadores`.
pub fn providers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(providers::list).post(providers::create))
        .route("/{id}", delete(providers::delete))
}

/// Routes mounted at `/areas-comuns`.
pub fn common_areas_router() -> Router<AppState> {
    Router::new().route("/", get(common_areas::list).post(common_areas::create))
}
