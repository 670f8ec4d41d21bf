pub mod auth;
pub mod health;
pub mod registry;
pub mod work_orders;

use std::any::Any;
use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{ConfigError, ServerConfig};
use crate::error::AppError;
use crate::handlers;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assemble the whole service: `/health`, the `/api/v1` tree, a JSON 404
/// fallback and the middleware stack. The binary and the HTTP tests both
/// build the app through here.
///
/// Layers, outermost first: request id assignment, tracing (the span
/// carries the request id), request id echo, CORS, timeout, panic recovery.
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        .merge(health::router())
        .nest("/api/v1", api_routes())
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors_layer(&config.cors_origins)?)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state);

    Ok(router)
}

/// CORS for a browser client holding a bearer token. No cookies are used,
/// so credentials stay disallowed.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidCorsOrigin {
                origin: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600)))
}

fn request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id
    )
}

async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found", "code": "NOT_FOUND" })),
    )
        .into_response()
}

/// Render a handler panic as the usual sanitized 500 body.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout
///
/// /users/me                            current user with server-side role
/// /dashboard                           summary counters
///
/// /areas-comuns                        list, create (admin)
/// /unidades                            list, create (admin)
/// /unidades/{id}                       delete (admin)
/// /moradores                           list, create (admin)
/// /moradores/{id}                      delete (admin)
/// /prestadores                         list, create (admin)
/// /prestadores/{id}                    delete (admin)
///
/// /reservas                            list, create
///
/// /ordens-servico                      list, create
/// /ordens-servico/{id}/status          update status (admin)
/// /ordens-servico/{id}/historico       status history
///
/// /avisos                              list, create (admin)
/// /avisos/{id}                         delete (admin)
///
/// /visitantes                          list, register
/// /visitantes/{id}/saida               record departure
///
/// /mail/broadcast                      bulk email to residents (admin)
/// /logs                                activity log (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/users/me", get(handlers::users::me))
        .route("/dashboard", get(handlers::dashboard::stats))
        .nest("/areas-comuns", registry::common_areas_router())
        .nest("/unidades", registry::units_router())
        .nest("/moradores", registry::residents_router())
        .nest("/prestadores", registry::providers_router())
        .route(
            "/reservas",
            get(handlers::reservations::list).post(handlers::reservations::create),
        )
        .nest("/ordens-servico", work_orders::router())
        .route(
            "/avisos",
            get(handlers::announcements::list).post(handlers::announcements::create),
        )
        .route("/avisos/{id}", delete(handlers::announcements::delete))
        .route(
            "/visitantes",
            get(handlers::visitors::list).post(handlers::visitors::create),
        )
        .route("/visitantes/{id}/saida", patch(handlers::visitors::depart))
        .route("/mail/broadcast", post(handlers::mail::broadcast))
        .route("/logs", get(handlers::activity::list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_origin_that_is_not_a_header_value() {
        let err = cors_layer(&["http://ok.test".into(), "http://bad\norigin".into()])
            .unwrap_err();
        let ConfigError::InvalidCorsOrigin { origin, .. } = err;
        assert_eq!(origin, "http://bad\norigin");
    }

    #[test]
    fn cors_accepts_configured_origins() {
        assert!(cors_layer(&["http://localhost:5173".into()]).is_ok());
    }
}
