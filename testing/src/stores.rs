//! In-memory store implementations.
//!
//! Fast, deterministic doubles for the Postgres stores. The mutex guard
//! plays the role of the database transaction: every conditional update
//! (claim, complete, sweep) checks its precondition and writes under one
//! guard, so the exactly-one-winner semantics of `accept_if_open` hold here
//! exactly as they do in production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use helphive_core::error::{CoreError, Result};
use helphive_core::store::{AccountStore, RequestStore};
use helphive_core::types::{
    Account, AccountId, Coordinates, HelpRequest, RequestFilter, RequestId, RequestStatus,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory request store.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    rows: Mutex<Vec<HelpRequest>>,
}

impl InMemoryRequestStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests, for test assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HelpRequest>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn insert(&self, request: &HelpRequest) -> Result<()> {
        let mut rows = self.lock();
        if rows.iter().any(|r| r.id == request.id) {
            return Err(CoreError::Conflict(format!(
                "duplicate request id: {}",
                request.id
            )));
        }
        rows.push(request.clone());
        Ok(())
    }

    async fn get(&self, id: RequestId) -> Result<Option<HelpRequest>> {
        Ok(self.lock().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>> {
        let mut matching: Vec<HelpRequest> = self
            .lock()
            .iter()
            .filter(|r| filter.status.is_none_or(|status| r.status == status))
            .filter(|r| {
                filter
                    .requester_id
                    .is_none_or(|requester| r.requester_id == requester)
            })
            .cloned()
            .collect();
        // Newest first; stable, so insertion order breaks timestamp ties.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn list_by_volunteer(&self, volunteer_id: AccountId) -> Result<Vec<HelpRequest>> {
        let mut matching: Vec<HelpRequest> = self
            .lock()
            .iter()
            .filter(|r| r.volunteer_id == Some(volunteer_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn accept_if_open(
        &self,
        id: RequestId,
        volunteer_id: AccountId,
    ) -> Result<Option<HelpRequest>> {
        let mut rows = self.lock();
        match rows
            .iter_mut()
            .find(|r| r.id == id && r.status == RequestStatus::Open)
        {
            Some(row) => {
                row.status = RequestStatus::Accepted;
                row.volunteer_id = Some(volunteer_id);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn complete_if_accepted(
        &self,
        id: RequestId,
        completed_at: DateTime<Utc>,
    ) -> Result<Option<HelpRequest>> {
        let mut rows = self.lock();
        match rows
            .iter_mut()
            .find(|r| r.id == id && r.status == RequestStatus::Accepted)
        {
            Some(row) => {
                row.status = RequestStatus::Completed;
                row.completed_at = Some(completed_at);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: RequestId) -> Result<bool> {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut rows = self.lock();
        let mut swept = 0_u64;
        for row in rows
            .iter_mut()
            .filter(|r| r.status == RequestStatus::Open && r.expires_at < now)
        {
            row.status = RequestStatus::Expired;
            swept += 1;
        }
        Ok(swept)
    }
}

/// In-memory account store, with an inherent `insert` for test setup (the
/// contract itself is read-plus-location-update only).
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    rows: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn insert(&self, account: Account) {
        self.lock().insert(account.id, account);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<AccountId, Account>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn update_location(&self, id: AccountId, coordinates: Coordinates) -> Result<()> {
        match self.lock().get_mut(&id) {
            Some(account) => {
                account.coordinates = Some(coordinates);
                Ok(())
            }
            None => Err(CoreError::NotFound),
        }
    }
}

/// Account store that can be told to fail reads for specific accounts, for
/// exercising feed enrichment fallbacks.
#[derive(Debug, Default)]
pub struct UnreliableAccountStore {
    inner: InMemoryAccountStore,
    failing: Mutex<HashSet<AccountId>>,
}

impl UnreliableAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn insert(&self, account: Account) {
        self.inner.insert(account);
    }

    /// Make every subsequent read of this account fail.
    pub fn fail_reads_for(&self, id: AccountId) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
    }
}

#[async_trait]
impl AccountStore for UnreliableAccountStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let failing = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id);
        if failing {
            return Err(CoreError::Store("account row unreadable".to_string()));
        }
        self.inner.get(id).await
    }

    async fn update_location(&self, id: AccountId, coordinates: Coordinates) -> Result<()> {
        self.inner.update_location(id, coordinates).await
    }
}
