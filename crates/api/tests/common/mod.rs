//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use condo_api::auth::jwt::{generate_access_token, JwtConfig};
use condo_api::auth::password::hash_password;
use condo_api::config::ServerConfig;
use condo_api::routes::build_app_router;
use condo_api::state::AppState;
use condo_core::types::DbId;
use condo_db::models::common_area::CreateCommonArea;
use condo_db::models::provider::CreateProvider;
use condo_db::models::resident::NewResident;
use condo_db::models::unit::CreateUnit;
use condo_db::models::user::CreateUser;
use condo_db::repositories::{CommonAreaRepo, ProviderRepo, ResidentRepo, UnitRepo, UserRepo};
use condo_events::{BulkMailer, EventBus, LogTransport};

pub const TEST_PASSWORD: &str = "senha-forte-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the application with the production middleware stack. Mail goes
/// to [`LogTransport`]; events are published to a bus nobody persists.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        mailer: BulkMailer::new(Arc::new(LogTransport)),
    };
    build_app_router(state, &config).unwrap()
}

/// Mint an access token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId, email: &str) -> String {
    generate_access_token(user_id, email, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_admin(pool: &PgPool) -> (DbId, String) {
    let email = "sindico@example.com";
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap();
    (user.id, token_for(user.id, email))
}

pub async fn seed_unit(pool: &PgPool, block: &str, number: &str) -> DbId {
    UnitRepo::create(
        pool,
        &CreateUnit {
            block: block.to_string(),
            number: number.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_area(pool: &PgPool, name: &str) -> DbId {
    CommonAreaRepo::create(pool, &CreateCommonArea { name: name.to_string() })
        .await
        .unwrap()
        .id
}

pub async fn seed_provider(pool: &PgPool) -> DbId {
    ProviderRepo::create(
        pool,
        &CreateProvider {
            name: "Hidro Serviços".to_string(),
            document: "12345678000199".to_string(),
            specialty: "Hidráulica".to_string(),
            company: None,
            phone: "1133334444".to_string(),
            email: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Resident with a real password hash. Returns the resident id and a token
/// for its credential.
pub async fn seed_resident(pool: &PgPool, unit_id: DbId, tag: u8) -> (DbId, String) {
    let email = format!("morador{tag}@example.com");
    let resident = ResidentRepo::create_with_user(
        pool,
        &NewResident {
            name: format!("Morador{tag}"),
            surname: "Silva".to_string(),
            document_id: format!("{:011}", 20_000_000_000u64 + u64::from(tag)),
            phone: "11987654321".to_string(),
            unit_id,
            email: email.clone(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap();
    (resident.id, token_for(resident.user_id, &email))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body with an explicit content type.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
