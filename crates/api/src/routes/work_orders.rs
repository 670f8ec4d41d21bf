//! Route definitions for the `/ordens-servico` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::work_orders;
use crate::state::AppState;

/// Routes mounted at `/ordens-servico`.
///
/// ```text
/// GET, POST  /                 -> list, create (status forced to open)
/// PATCH      /{id}/status      -> update_status (admin)
/// GET        /{id}/historico   -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work_orders::list).post(work_orders::create))
        .route("/{id}/status", patch(work_orders::update_status))
        .route("/{id}/historico", get(work_orders::history))
}
