//! Store contracts for requests and accounts.
//!
//! The lifecycle engine and feed assembler depend on these traits only.
//! Two implementations exist:
//!
//! - `PostgresRequestStore` / `PostgresAccountStore` in `helphive-postgres`
//!   (production)
//! - `InMemoryRequestStore` / `InMemoryAccountStore` in `helphive-testing`
//!   (fast, deterministic)
//!
//! # Atomicity
//!
//! The conditional operations ([`RequestStore::accept_if_open`],
//! [`RequestStore::complete_if_accepted`], [`RequestStore::expire_overdue`])
//! carry the one correctness-critical contract of the system: the
//! precondition check and the status write are a single atomic unit against
//! the store. The core implements no locking of its own.

use crate::error::Result;
use crate::types::{Account, AccountId, Coordinates, HelpRequest, RequestFilter, RequestId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable collection of help-request records.
///
/// Implementations must be `Send + Sync`; the engine shares them as
/// `Arc<dyn RequestStore>`.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persist a newly created request.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Conflict` on a duplicate id (surfaced, never
    /// swallowed) and `CoreError::Store` on any other persistence failure.
    async fn insert(&self, request: &HelpRequest) -> Result<()>;

    /// Fetch a single request by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    async fn get(&self, id: RequestId) -> Result<Option<HelpRequest>>;

    /// Fetch requests matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    async fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>>;

    /// Fetch requests assigned to the given volunteer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    async fn list_by_volunteer(&self, volunteer_id: AccountId) -> Result<Vec<HelpRequest>>;

    /// Atomically claim the request for `volunteer_id` iff it is currently
    /// `Open`.
    ///
    /// Returns the updated request on success, or `None` if no row was in
    /// the `Open` state under that id (missing, already claimed, completed
    /// or expired). Exactly one of any number of concurrent callers can
    /// observe `Some`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the update fails.
    async fn accept_if_open(
        &self,
        id: RequestId,
        volunteer_id: AccountId,
    ) -> Result<Option<HelpRequest>>;

    /// Atomically complete the request iff it is currently `Accepted`,
    /// stamping `completed_at`.
    ///
    /// Returns the updated request, or `None` if no row was in the
    /// `Accepted` state under that id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the update fails.
    async fn complete_if_accepted(
        &self,
        id: RequestId,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<HelpRequest>>;

    /// Remove the request entirely. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the delete fails.
    async fn delete(&self, id: RequestId) -> Result<bool>;

    /// Transition every `Open` request whose deadline has passed to
    /// `Expired`. Idempotent. Returns the number of rows transitioned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the update fails.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Durable collection of participant accounts.
///
/// The lifecycle engine and feed assembler only ever read accounts; the
/// location update exists for the boundary layer, where participants report
/// their position.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch an account by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    async fn get(&self, id: AccountId) -> Result<Option<Account>>;

    /// Record the account's reported position.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the account does not exist, or
    /// `CoreError::Store` if the update fails.
    async fn update_location(&self, id: AccountId, coordinates: Coordinates) -> Result<()>;
}
