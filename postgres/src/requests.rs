//! `PostgreSQL` request store.

use crate::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use helphive_core::error::{CoreError, Result};
use helphive_core::store::RequestStore;
use helphive_core::types::{
    AccountId, Coordinates, HelpRequest, RequestFilter, RequestId,
};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

const REQUEST_COLUMNS: &str = "id, requester_id, title, description, category, urgency, \
     location_name, latitude, longitude, status, volunteer_id, created_at, expires_at, completed_at";

/// Help-request store backed by `PostgreSQL`.
///
/// Runtime-checked queries are used throughout so the workspace builds
/// without a live database.
#[derive(Clone)]
pub struct PostgresRequestStore {
    pool: PgPool,
}

impl PostgresRequestStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row as stored; enums live as CHECK-constrained text columns.
#[derive(sqlx::FromRow)]
struct HelpRequestRow {
    id: Uuid,
    requester_id: Uuid,
    title: String,
    description: String,
    category: String,
    urgency: String,
    location_name: String,
    latitude: f64,
    longitude: f64,
    status: String,
    volunteer_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<HelpRequestRow> for HelpRequest {
    type Error = CoreError;

    fn try_from(row: HelpRequestRow) -> Result<Self> {
        // The CHECK constraints make a parse failure a corrupt row, not bad
        // input.
        let corrupt = |e: CoreError| CoreError::Store(format!("corrupt help_requests row: {e}"));
        Ok(Self {
            id: RequestId::from_uuid(row.id),
            requester_id: AccountId::from_uuid(row.requester_id),
            title: row.title,
            description: row.description,
            category: row.category.parse().map_err(corrupt)?,
            urgency: row.urgency.parse().map_err(corrupt)?,
            location_name: row.location_name,
            coordinates: Coordinates::new(row.latitude, row.longitude),
            status: row.status.parse().map_err(corrupt)?,
            volunteer_id: row.volunteer_id.map(AccountId::from_uuid),
            created_at: row.created_at,
            expires_at: row.expires_at,
            completed_at: row.completed_at,
        })
    }
}

#[async_trait]
impl RequestStore for PostgresRequestStore {
    async fn insert(&self, request: &HelpRequest) -> Result<()> {
        sqlx::query(
            "INSERT INTO help_requests \
                 (id, requester_id, title, description, category, urgency, \
                  location_name, latitude, longitude, status, volunteer_id, \
                  created_at, expires_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(request.id.as_uuid())
        .bind(request.requester_id.as_uuid())
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.category.as_str())
        .bind(request.urgency.as_str())
        .bind(&request.location_name)
        .bind(request.coordinates.latitude)
        .bind(request.coordinates.longitude)
        .bind(request.status.as_str())
        .bind(request.volunteer_id.as_ref().map(AccountId::as_uuid))
        .bind(request.created_at)
        .bind(request.expires_at)
        .bind(request.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to insert help request", &e))?;
        Ok(())
    }

    async fn get(&self, id: RequestId) -> Result<Option<HelpRequest>> {
        let row: Option<HelpRequestRow> = sqlx::query_as(&format!(
            "SELECT {REQUEST_COLUMNS} FROM help_requests WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to get help request", &e))?;

        row.map(HelpRequest::try_from).transpose()
    }

    async fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {REQUEST_COLUMNS} FROM help_requests WHERE TRUE"
        ));
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(requester_id) = filter.requester_id {
            query
                .push(" AND requester_id = ")
                .push_bind(*requester_id.as_uuid());
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<HelpRequestRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("failed to list help requests", &e))?;

        rows.into_iter().map(HelpRequest::try_from).collect()
    }

    async fn list_by_volunteer(&self, volunteer_id: AccountId) -> Result<Vec<HelpRequest>> {
        let rows: Vec<HelpRequestRow> = sqlx::query_as(&format!(
            "SELECT {REQUEST_COLUMNS} FROM help_requests \
             WHERE volunteer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(volunteer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to list requests by volunteer", &e))?;

        rows.into_iter().map(HelpRequest::try_from).collect()
    }

    async fn accept_if_open(
        &self,
        id: RequestId,
        volunteer_id: AccountId,
    ) -> Result<Option<HelpRequest>> {
        // Single-statement claim: the status check and the write are atomic,
        // so exactly one concurrent caller gets the row back.
        let row: Option<HelpRequestRow> = sqlx::query_as(&format!(
            "UPDATE help_requests \
             SET status = 'accepted', volunteer_id = $2 \
             WHERE id = $1 AND status = 'open' \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(volunteer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to accept help request", &e))?;

        row.map(HelpRequest::try_from).transpose()
    }

    async fn complete_if_accepted(
        &self,
        id: RequestId,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<HelpRequest>> {
        let row: Option<HelpRequestRow> = sqlx::query_as(&format!(
            "UPDATE help_requests \
             SET status = 'completed', completed_at = $2 \
             WHERE id = $1 AND status = 'accepted' \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to complete help request", &e))?;

        row.map(HelpRequest::try_from).transpose()
    }

    async fn delete(&self, id: RequestId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM help_requests WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("failed to delete help request", &e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE help_requests SET status = 'expired' \
             WHERE status = 'open' AND expires_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to expire overdue requests", &e))?;
        Ok(result.rows_affected())
    }
}
