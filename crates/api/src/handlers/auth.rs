//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_db::models::session::CreateSession;
use condo_db::models::user::User;
use condo_db::repositories::{SessionRepo, UserRepo};
use condo_events::{event_types, CondoEvent};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lock duration after too many failures.
const LOCK_DURATION_MINS: i32 = 15;

/// Longest `User-Agent` kept on a session row.
const MAX_USER_AGENT_LENGTH: usize = 255;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(alias = "senha")]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Unknown emails, wrong passwords, and locked or deactivated accounts all
/// get the same 401 body.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        tracing::info!(user_id = user.id, "Login refused: account deactivated");
        return Err(invalid_credentials());
    }

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        tracing::info!(user_id = user.id, "Login refused: account locked");
        return Err(invalid_credentials());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failure = UserRepo::record_failed_login(
            &state.pool,
            user.id,
            MAX_FAILED_ATTEMPTS,
            LOCK_DURATION_MINS,
        )
        .await?;
        if failure.failed_login_count >= MAX_FAILED_ATTEMPTS {
            tracing::warn!(
                user_id = user.id,
                attempts = failure.failed_login_count,
                "Account locked after repeated failed logins"
            );
        }
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::USER_LOGGED_IN)
            .with_entity("user", user.id)
            .with_actor(user.id),
    );

    let (response, session) = issue_tokens(&state, &user, user_agent(&headers))?;
    SessionRepo::create(&state.pool, &session).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The presented token is spent.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_usable(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    if !user.is_active {
        SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // Losing a concurrent rotation race means the token was already spent.
    let (response, next) = issue_tokens(&state, &user, user_agent(&headers))?;
    SessionRepo::rotate(&state.pool, session.id, &next)
        .await?
        .ok_or_else(invalid_refresh_token)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "Logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.chars().take(MAX_USER_AGENT_LENGTH).collect())
}

/// Mint an access + refresh token pair for `user`.
///
/// Returns the response body and the session row to persist for the refresh
/// token. The caller decides whether it opens a session or rotates one.
fn issue_tokens(
    state: &AppState,
    user: &User,
    user_agent: Option<String>,
) -> AppResult<(AuthResponse, CreateSession)> {
    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now()
            + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent,
    };

    let response = AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        },
    };

    Ok((response, session))
}
