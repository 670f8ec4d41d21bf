//! First-run administrator provisioning.
//!
//! When `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set and no active admin
//! exists, an admin credential is created at startup. Residents are created
//! through `POST /moradores`, so without this the system has no way in.

use condo_core::roles::ROLE_ADMIN;
use condo_db::models::user::CreateUser;
use condo_db::repositories::UserRepo;
use condo_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Admin credential read from the environment.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// Returns `None` unless both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            email: std::env::var("ADMIN_EMAIL").ok()?.trim().to_lowercase(),
            password: std::env::var("ADMIN_PASSWORD").ok()?,
        })
    }
}

/// Create the seed admin unless an active admin already exists.
///
/// Returns `true` when a user was created.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::count_active_admins(pool).await? > 0 {
        return Ok(false);
    }
    if UserRepo::find_by_email(pool, &seed.email).await?.is_some() {
        tracing::warn!(email = %seed.email, "ADMIN_EMAIL belongs to an existing non-admin user");
        return Ok(false);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::InternalError(format!("ADMIN_PASSWORD rejected: {msg}")))?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: seed.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(true)
}
