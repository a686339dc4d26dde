//! `PostgreSQL` account store.
//!
//! Accounts are owned by the identity service; the coordination core only
//! reads them, plus the location update used when a participant reports
//! their position.

use crate::map_sqlx_error;
use async_trait::async_trait;
use helphive_core::error::{CoreError, Result};
use helphive_core::store::AccountStore;
use helphive_core::types::{Account, AccountId, Coordinates};
use sqlx::PgPool;
use uuid::Uuid;

/// Account store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    display_name: String,
    role: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl TryFrom<AccountRow> for Account {
    type Error = CoreError;

    fn try_from(row: AccountRow) -> Result<Self> {
        let coordinates = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Ok(Self {
            id: AccountId::from_uuid(row.id),
            display_name: row.display_name,
            role: row
                .role
                .parse()
                .map_err(|e| CoreError::Store(format!("corrupt accounts row: {e}")))?,
            coordinates,
        })
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, display_name, role, latitude, longitude FROM accounts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to get account", &e))?;

        row.map(Account::try_from).transpose()
    }

    async fn update_location(&self, id: AccountId, coordinates: Coordinates) -> Result<()> {
        let result = sqlx::query(
            "UPDATE accounts SET latitude = $2, longitude = $3, updated_at = now() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(coordinates.latitude)
        .bind(coordinates.longitude)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("failed to update account location", &e))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }
}
