//! Integration tests for the work-order status lifecycle.

mod common;

use assert_matches::assert_matches;
use condo_core::error::CoreError;
use condo_core::work_order::{Priority, WorkOrderStatus};
use condo_db::repositories::WorkOrderRepo;
use condo_db::DbError;
use sqlx::PgPool;

use common::{seed_admin, seed_provider};

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_orders_start_open(pool: PgPool) {
    let provider = seed_provider(&pool, "Encanador", "12345678901").await;

    let order = WorkOrderRepo::create(&pool, "Vazamento", "Garagem", Priority::High, provider)
        .await
        .unwrap();
    assert_eq!(order.status, "open");
    assert_eq!(order.priority, "high");

    let listed = WorkOrderRepo::list_detailed(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].provider_name, "Encanador");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn full_lifecycle_is_recorded_in_history(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let provider = seed_provider(&pool, "Eletricista", "12345678000199").await;
    let order = WorkOrderRepo::create(&pool, "Lâmpada queimada", "Hall", Priority::Low, provider)
        .await
        .unwrap();

    let (from, updated) =
        WorkOrderRepo::set_status(&pool, order.id, WorkOrderStatus::InProgress, admin)
            .await
            .unwrap();
    assert_eq!(from, WorkOrderStatus::Open);
    assert_eq!(updated.status, "in_progress");

    WorkOrderRepo::set_status(&pool, order.id, WorkOrderStatus::Completed, admin)
        .await
        .unwrap();

    let history = WorkOrderRepo::history(&pool, order.id).await.unwrap();
    let edges: Vec<_> = history
        .iter()
        .map(|c| (c.from_status.as_str(), c.to_status.as_str()))
        .collect();
    assert_eq!(edges, [("open", "in_progress"), ("in_progress", "completed")]);
    assert!(history.iter().all(|c| c.changed_by == admin));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_transition_leaves_status_and_history_untouched(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let provider = seed_provider(&pool, "Pintor", "98765432100").await;
    let order = WorkOrderRepo::create(&pool, "Pintura", "Fachada", Priority::Medium, provider)
        .await
        .unwrap();

    let err = WorkOrderRepo::set_status(&pool, order.id, WorkOrderStatus::Completed, admin)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Domain(CoreError::InvalidTransition { .. }));

    let stored = WorkOrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, "open");
    assert!(WorkOrderRepo::history(&pool, order.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminal_orders_cannot_move(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let provider = seed_provider(&pool, "Jardineiro", "11122233344").await;
    let order = WorkOrderRepo::create(&pool, "Poda", "Jardim", Priority::Low, provider)
        .await
        .unwrap();

    WorkOrderRepo::set_status(&pool, order.id, WorkOrderStatus::Cancelled, admin)
        .await
        .unwrap();

    for next in WorkOrderStatus::ALL {
        let result = WorkOrderRepo::set_status(&pool, order.id, next, admin).await;
        assert_matches!(result, Err(DbError::Domain(CoreError::InvalidTransition { .. })));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_order_is_not_found(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let err = WorkOrderRepo::set_status(&pool, 4242, WorkOrderStatus::InProgress, admin)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Domain(CoreError::NotFound { entity: "WorkOrder", id: 4242 }));
}
