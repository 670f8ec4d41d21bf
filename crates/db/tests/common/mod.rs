//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use condo_core::reservation::TimeWindow;
use condo_core::types::DbId;
use condo_db::models::common_area::CreateCommonArea;
use condo_db::models::provider::CreateProvider;
use condo_db::models::reservation::NewReservation;
use condo_db::models::resident::NewResident;
use condo_db::models::unit::CreateUnit;
use condo_db::models::user::CreateUser;
use condo_db::repositories::{CommonAreaRepo, ProviderRepo, ResidentRepo, UnitRepo, UserRepo};
use sqlx::PgPool;

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

/// Create a resident with its credential. `tag` keeps emails and
/// CPFs unique across calls.
pub async fn seed_resident(pool: &PgPool, unit_id: DbId, tag: u8) -> DbId {
    ResidentRepo::create_with_user(
        pool,
        &NewResident {
            name: format!("Morador{tag}"),
            surname: "Silva".to_string(),
            document_id: format!("{:011}", 10_000_000_000u64 + u64::from(tag)),
            phone: "11987654321".to_string(),
            unit_id,
            email: format!("morador{tag}@example.com"),
            password_hash: "$argon2id$test".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_provider(pool: &PgPool, name: &str, document: &str) -> DbId {
    ProviderRepo::create(
        pool,
        &CreateProvider {
            name: name.to_string(),
            document: document.to_string(),
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

pub async fn seed_admin(pool: &PgPool) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "sindico@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn booking(area: DbId, resident: DbId, day: &str, start: &str, end: &str) -> NewReservation {
    let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
    NewReservation {
        common_area_id: area,
        resident_id: resident,
        date: date(day),
        window: TimeWindow::new(t(start), t(end)).unwrap(),
    }
}
