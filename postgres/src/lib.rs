//! # HelpHive Postgres
//!
//! `PostgreSQL` implementations of the HelpHive store contracts
//! ([`helphive_core::store::RequestStore`] and
//! [`helphive_core::store::AccountStore`]) using sqlx with connection
//! pooling.
//!
//! The conditional lifecycle updates are single `UPDATE ... WHERE status`
//! statements, so the precondition check and the write are one atomic unit:
//! of any number of concurrent accept attempts, exactly one row update
//! succeeds.
//!
//! # Example
//!
//! ```no_run
//! use helphive_postgres::{run_migrations, PostgresRequestStore};
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/helphive").await?;
//! run_migrations(&pool).await?;
//! let requests = PostgresRequestStore::new(pool);
//! # Ok(())
//! # }
//! ```

mod accounts;
mod requests;

pub use accounts::PostgresAccountStore;
pub use requests::PostgresRequestStore;

use helphive_core::error::{CoreError, Result};
use sqlx::PgPool;

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns `CoreError::Store` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| CoreError::Store(format!("migration failed: {e}")))?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Map a sqlx error onto the core taxonomy: unique-constraint violations
/// become conflicts, everything else a store failure.
pub(crate) fn map_sqlx_error(context: &str, error: &sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = error {
        if db_err.is_unique_violation() {
            return CoreError::Conflict(format!("{context}: {db_err}"));
        }
    }
    CoreError::Store(format!("{context}: {error}"))
}
