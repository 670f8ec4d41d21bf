//! HTTP-level tests for `/reservas`: shape validation, existence checks and
//! overlap conflicts.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, post_raw_auth};
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    app: axum::Router,
    token: String,
    area: i64,
    resident: i64,
}

async fn fixture(pool: PgPool) -> Fixture {
    let unit = common::seed_unit(&pool, "B", "202").await;
    let area = common::seed_area(&pool, "Salão de Festas").await;
    let (resident, token) = common::seed_resident(&pool, unit, 1).await;
    Fixture {
        app: common::build_test_app(pool),
        token,
        area,
        resident,
    }
}

fn body(f: &Fixture, date: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "areaComumId": f.area,
        "moradorId": f.resident,
        "data": date,
        "horaInicio": start,
        "horaFim": end,
    })
}

async fn book(f: &Fixture, date: &str, start: &str, end: &str) -> axum::response::Response {
    post_json_auth(
        f.app.clone(),
        "/api/v1/reservas",
        body(f, date, start, end),
        &f.token,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_returns_denormalized_detail(pool: PgPool) {
    let f = fixture(pool).await;

    let response = book(&f, "2099-06-01", "10:00", "12:00").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["horaInicio"], "10:00");
    assert_eq!(json["data"]["horaFim"], "12:00");
    assert_eq!(json["data"]["status"], "scheduled");
    assert_eq!(json["data"]["areaComum"]["nome"], "Salão de Festas");
    assert_eq!(json["data"]["morador"]["unidade"]["bloco"], "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_booking_is_409_and_back_to_back_is_201(pool: PgPool) {
    let f = fixture(pool).await;
    assert_eq!(book(&f, "2099-06-01", "10:00", "12:00").await.status(), StatusCode::CREATED);

    let overlap = book(&f, "2099-06-01", "11:00", "13:00").await;
    assert_eq!(overlap.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(overlap).await["code"], "CONFLICT");

    let adjacent = book(&f, "2099-06-01", "12:00", "14:00").await;
    assert_eq!(adjacent.status(), StatusCode::CREATED);

    let list = body_json(get_auth(f.app.clone(), "/api/v1/reservas", &f.token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inverted_or_empty_window_is_400(pool: PgPool) {
    let f = fixture(pool).await;

    for (start, end) in [("14:00", "10:00"), ("10:00", "10:00")] {
        let response = book(&f, "2099-06-01", start, end).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_date_or_body_is_400(pool: PgPool) {
    let f = fixture(pool).await;

    let bad_date = book(&f, "01/06/2099", "10:00", "12:00").await;
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

    let missing_field = post_json_auth(
        f.app.clone(),
        "/api/v1/reservas",
        json!({ "areaComumId": f.area }),
        &f.token,
    )
    .await;
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);

    let not_json = post_raw_auth(f.app.clone(), "/api/v1/reservas", "{", &f.token).await;
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(not_json).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_area_is_404(pool: PgPool) {
    let f = fixture(pool).await;

    let mut payload = body(&f, "2099-06-01", "10:00", "12:00");
    payload["areaComumId"] = json!(999_999);
    let response = post_json_auth(f.app.clone(), "/api/v1/reservas", payload, &f.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_reservation_lists_as_completed(pool: PgPool) {
    let f = fixture(pool).await;
    assert_eq!(book(&f, "2000-01-01", "08:00", "09:00").await.status(), StatusCode::CREATED);

    let list = body_json(get_auth(f.app.clone(), "/api/v1/reservas", &f.token).await).await;
    assert_eq!(list["data"][0]["status"], "completed");
}
