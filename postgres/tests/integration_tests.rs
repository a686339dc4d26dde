//! Store contract tests against a live Postgres.
//!
//! Each test skips itself unless `DATABASE_URL` is set, so the suite stays
//! green in environments without a database. Run with e.g.
//!
//! ```text
//! DATABASE_URL=postgresql://localhost/helphive_test cargo test -p helphive-postgres
//! ```

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::{Duration, Utc};
use helphive_core::store::{AccountStore, RequestStore};
use helphive_core::types::{
    Account, AccountId, Coordinates, HelpCategory, HelpRequest, RequestFilter, RequestId,
    RequestStatus, Role, Urgency,
};
use helphive_postgres::{PostgresAccountStore, PostgresRequestStore, run_migrations};
use sqlx::PgPool;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Some(pool)
}

async fn insert_account(pool: &PgPool, role: Role) -> AccountId {
    let id = AccountId::new();
    sqlx::query("INSERT INTO accounts (id, display_name, role) VALUES ($1, $2, $3)")
        .bind(id.as_uuid())
        .bind(format!("account-{id}"))
        .bind(role.as_str())
        .execute(pool)
        .await
        .unwrap();
    id
}

fn sample_request(requester_id: AccountId) -> HelpRequest {
    let created_at = Utc::now();
    HelpRequest {
        id: RequestId::new(),
        requester_id,
        title: "Need groceries".to_string(),
        description: "Cannot leave the house this week".to_string(),
        category: HelpCategory::Supplies,
        urgency: Urgency::Medium,
        location_name: "Corner of 5th and Main".to_string(),
        coordinates: Coordinates::new(40.0, -74.0),
        status: RequestStatus::Open,
        volunteer_id: None,
        created_at,
        expires_at: created_at + Duration::hours(24),
        completed_at: None,
    }
}

#[tokio::test]
async fn insert_and_get_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let request = sample_request(requester);

    store.insert(&request).await.unwrap();
    let fetched = store.get(request.id).await.unwrap().unwrap();

    assert_eq!(fetched.id, request.id);
    assert_eq!(fetched.title, request.title);
    assert_eq!(fetched.status, RequestStatus::Open);
    assert_eq!(fetched.volunteer_id, None);
}

#[tokio::test]
async fn get_missing_request_is_none() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool);

    assert!(store.get(RequestId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_filters_by_status_and_requester() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let other = insert_account(&pool, Role::User).await;

    store.insert(&sample_request(requester)).await.unwrap();
    store.insert(&sample_request(requester)).await.unwrap();
    store.insert(&sample_request(other)).await.unwrap();

    let filter = RequestFilter {
        status: Some(RequestStatus::Open),
        requester_id: Some(requester),
    };
    let listed = store.list(&filter).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r.requester_id == requester));
    // Newest first.
    assert!(listed[0].created_at >= listed[1].created_at);
}

#[tokio::test]
async fn accept_claim_is_conditional_on_open_state() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let first = insert_account(&pool, Role::Volunteer).await;
    let second = insert_account(&pool, Role::Volunteer).await;
    let request = sample_request(requester);
    store.insert(&request).await.unwrap();

    let won = store.accept_if_open(request.id, first).await.unwrap();
    assert_eq!(won.unwrap().volunteer_id, Some(first));

    // The row is no longer open, so the second claim gets nothing back.
    let lost = store.accept_if_open(request.id, second).await.unwrap();
    assert!(lost.is_none());

    let current = store.get(request.id).await.unwrap().unwrap();
    assert_eq!(current.status, RequestStatus::Accepted);
    assert_eq!(current.volunteer_id, Some(first));
}

#[tokio::test]
async fn complete_claim_requires_accepted_state() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let volunteer = insert_account(&pool, Role::Volunteer).await;
    let request = sample_request(requester);
    store.insert(&request).await.unwrap();

    let now = Utc::now();
    assert!(
        store
            .complete_if_accepted(request.id, now)
            .await
            .unwrap()
            .is_none()
    );

    store.accept_if_open(request.id, volunteer).await.unwrap();
    let completed = store
        .complete_if_accepted(request.id, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, RequestStatus::Completed);
    assert_eq!(completed.completed_at, Some(now));
}

#[tokio::test]
async fn expire_overdue_touches_only_open_rows_past_deadline() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;

    let mut overdue = sample_request(requester);
    overdue.created_at -= Duration::hours(48);
    overdue.expires_at = overdue.created_at + Duration::hours(1);
    store.insert(&overdue).await.unwrap();

    let fresh = sample_request(requester);
    store.insert(&fresh).await.unwrap();

    let swept = store.expire_overdue(Utc::now()).await.unwrap();
    assert!(swept >= 1);

    let overdue_now = store.get(overdue.id).await.unwrap().unwrap();
    assert_eq!(overdue_now.status, RequestStatus::Expired);
    let fresh_now = store.get(fresh.id).await.unwrap().unwrap();
    assert_eq!(fresh_now.status, RequestStatus::Open);
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let request = sample_request(requester);
    store.insert(&request).await.unwrap();

    assert!(store.delete(request.id).await.unwrap());
    assert!(!store.delete(request.id).await.unwrap());
    assert!(store.get(request.id).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_insert_surfaces_as_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresRequestStore::new(pool.clone());
    let requester = insert_account(&pool, Role::User).await;
    let request = sample_request(requester);
    store.insert(&request).await.unwrap();

    let err = store.insert(&request).await.unwrap_err();
    assert!(matches!(
        err,
        helphive_core::error::CoreError::Conflict(_)
    ));
}

#[tokio::test]
async fn account_get_and_location_update() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresAccountStore::new(pool.clone());
    let id = insert_account(&pool, Role::Volunteer).await;

    let account: Account = store.get(id).await.unwrap().unwrap();
    assert_eq!(account.role, Role::Volunteer);
    assert_eq!(account.coordinates, None);

    let position = Coordinates::new(40.0, -74.0);
    store.update_location(id, position).await.unwrap();
    let account = store.get(id).await.unwrap().unwrap();
    assert_eq!(account.coordinates, Some(position));
}

#[tokio::test]
async fn location_update_for_missing_account_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PostgresAccountStore::new(pool);

    let err = store
        .update_location(AccountId::new(), Coordinates::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, helphive_core::error::CoreError::NotFound));
}
