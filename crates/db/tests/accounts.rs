//! Integration tests for login bookkeeping and refresh-token sessions.

mod common;

use chrono::{Duration, Utc};
use condo_db::models::session::CreateSession;
use condo_db::models::user::CreateUser;
use condo_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

use common::seed_admin;

fn session(user_id: i64, hash: &str, expires_in: Duration) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: hash.to_string(),
        expires_at: Utc::now() + expires_in,
        user_agent: Some("integration-test".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fifth_failure_locks_the_account(pool: PgPool) {
    let id = seed_admin(&pool).await;

    for attempt in 1..=4 {
        let failure = UserRepo::record_failed_login(&pool, id, 5, 15).await.unwrap();
        assert_eq!(failure.failed_login_count, attempt);
        assert!(failure.locked_until.is_none());
    }

    let failure = UserRepo::record_failed_login(&pool, id, 5, 15).await.unwrap();
    assert_eq!(failure.failed_login_count, 5);
    let until = failure.locked_until.expect("locked");
    assert!(until > Utc::now() + Duration::minutes(14));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_failures_are_all_counted(pool: PgPool) {
    let id = seed_admin(&pool).await;

    let attempts = (0..5).map(|_| UserRepo::record_failed_login(&pool, id, 5, 15));
    let mut counts: Vec<i32> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap().failed_login_count)
        .collect();
    counts.sort_unstable();
    assert_eq!(counts, [1, 2, 3, 4, 5]);

    let user = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(user.locked_until.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failure_after_expired_lock_restarts_the_count(pool: PgPool) {
    let id = seed_admin(&pool).await;
    sqlx::query(
        "UPDATE users SET failed_login_count = 5, locked_until = NOW() - INTERVAL '1 second'",
    )
    .execute(&pool)
    .await
    .unwrap();

    let failure = UserRepo::record_failed_login(&pool, id, 5, 15).await.unwrap();
    assert_eq!(failure.failed_login_count, 1);
    assert!(failure.locked_until.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn emails_are_unique_regardless_of_case(pool: PgPool) {
    seed_admin(&pool).await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "SINDICO@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            role: "resident".to_string(),
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rotation_spends_the_previous_session_once(pool: PgPool) {
    let user = seed_admin(&pool).await;
    let first = SessionRepo::create(&pool, &session(user, "hash-1", Duration::days(7)))
        .await
        .unwrap();

    let second = SessionRepo::rotate(&pool, first.id, &session(user, "hash-2", Duration::days(7)))
        .await
        .unwrap()
        .expect("first rotation succeeds");
    assert!(SessionRepo::find_usable(&pool, "hash-1").await.unwrap().is_none());
    assert_eq!(
        SessionRepo::find_usable(&pool, "hash-2").await.unwrap().map(|s| s.id),
        Some(second.id)
    );

    let replay = SessionRepo::rotate(&pool, first.id, &session(user, "hash-3", Duration::days(7)))
        .await
        .unwrap();
    assert!(replay.is_none());
    assert!(SessionRepo::find_usable(&pool, "hash-3").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_removes_only_unusable_sessions(pool: PgPool) {
    let user = seed_admin(&pool).await;
    SessionRepo::create(&pool, &session(user, "live", Duration::days(7)))
        .await
        .unwrap();
    SessionRepo::create(&pool, &session(user, "expired", Duration::minutes(-5)))
        .await
        .unwrap();
    let spent = SessionRepo::create(&pool, &session(user, "spent", Duration::days(7)))
        .await
        .unwrap();
    SessionRepo::rotate(&pool, spent.id, &session(user, "spent-next", Duration::days(7)))
        .await
        .unwrap();

    assert_eq!(SessionRepo::purge_stale(&pool).await.unwrap(), 2);

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 2);
    assert!(SessionRepo::find_usable(&pool, "live").await.unwrap().is_some());
}
