//! Feed assembly: the ranked, enriched request list shown to a viewer.
//!
//! Combines the request store with the identity store and the distance
//! calculator. The feed is filter-and-distance only: urgency is carried as
//! data but never used for ordering here.

use crate::distance::distance_km;
use crate::environment::Clock;
use crate::error::Result;
use crate::store::{AccountStore, RequestStore};
use crate::types::{AccountId, HelpRequest, RequestFilter};
use futures::future::join_all;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Placeholder shown when a requester's account cannot be resolved.
pub const UNKNOWN_USER: &str = "Unknown User";

/// A help request enriched for display: the requester's name and, when the
/// viewer's position is known, the distance to the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedHelpRequest {
    /// The underlying request.
    #[serde(flatten)]
    pub request: HelpRequest,
    /// Display name of the requester, or [`UNKNOWN_USER`].
    pub requester_name: String,
    /// Distance from the viewer in kilometers; `None` when the viewer's
    /// position is unknown.
    pub distance_km: Option<f64>,
}

/// Builds viewer-specific feeds from the stores.
#[derive(Clone)]
pub struct FeedAssembler {
    requests: Arc<dyn RequestStore>,
    accounts: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
}

impl FeedAssembler {
    /// Create a new assembler over the given stores and clock.
    #[must_use]
    pub fn new(
        requests: Arc<dyn RequestStore>,
        accounts: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            accounts,
            clock,
        }
    }

    /// Build the feed for a viewer.
    ///
    /// 1. Sweeps overdue requests so the feed never shows a stale `Open`
    ///    entry past its deadline.
    /// 2. Fetches matching requests, newest first.
    /// 3. Resolves requester names; a missing or unreadable account becomes
    ///    [`UNKNOWN_USER`] rather than failing the whole feed.
    /// 4. When the viewer's reported position is known, attaches a distance
    ///    to every entry and sorts ascending by it (missing distances
    ///    last). Otherwise every distance is `None` and store order is
    ///    preserved.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the sweep or the request fetch fails.
    pub async fn build(
        &self,
        viewer_id: AccountId,
        filter: &RequestFilter,
    ) -> Result<Vec<EnrichedHelpRequest>> {
        let swept = self.requests.expire_overdue(self.clock.now()).await?;
        if swept > 0 {
            tracing::debug!(count = swept, "feed sweep expired overdue requests");
        }

        let rows = self.requests.list(filter).await?;
        let viewer_coords = self
            .accounts
            .get(viewer_id)
            .await?
            .and_then(|account| account.coordinates);

        let names = join_all(
            rows.iter()
                .map(|request| self.requester_name(request.requester_id)),
        )
        .await;

        let mut entries: Vec<EnrichedHelpRequest> = rows
            .into_iter()
            .zip(names)
            .map(|(request, requester_name)| {
                let distance = viewer_coords.map(|viewer| distance_km(viewer, request.coordinates));
                EnrichedHelpRequest {
                    request,
                    requester_name,
                    distance_km: distance,
                }
            })
            .collect();

        if viewer_coords.is_some() {
            entries.sort_by(|a, b| {
                let da = a.distance_km.unwrap_or(f64::INFINITY);
                let db = b.distance_km.unwrap_or(f64::INFINITY);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            });
        }

        Ok(entries)
    }

    /// Enrich a single request with its requester's name, for detail views.
    /// No distance is attached.
    pub async fn enrich_one(&self, request: HelpRequest) -> EnrichedHelpRequest {
        let requester_name = self.requester_name(request.requester_id).await;
        EnrichedHelpRequest {
            request,
            requester_name,
            distance_km: None,
        }
    }

    async fn requester_name(&self, id: AccountId) -> String {
        match self.accounts.get(id).await {
            Ok(Some(account)) => account.display_name,
            Ok(None) => UNKNOWN_USER.to_string(),
            Err(error) => {
                tracing::warn!(account = %id, %error, "account lookup failed during feed enrichment");
                UNKNOWN_USER.to_string()
            }
        }
    }
}
