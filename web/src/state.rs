//! Application state for Axum handlers.

use helphive_core::environment::Clock;
use helphive_core::feed::FeedAssembler;
use helphive_core::lifecycle::LifecycleEngine;
use helphive_core::store::{AccountStore, RequestStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds the lifecycle engine and feed assembler over trait-object stores,
/// so tests can swap the Postgres stores for in-memory ones and a manual
/// clock.
#[derive(Clone)]
pub struct AppState {
    /// Request lifecycle operations.
    pub engine: LifecycleEngine,
    /// Feed assembly (enrichment and distance ranking).
    pub feed: FeedAssembler,
    /// Account reads and location updates.
    pub accounts: Arc<dyn AccountStore>,
}

impl AppState {
    /// Wire up the state from its stores and clock.
    #[must_use]
    pub fn new(
        requests: Arc<dyn RequestStore>,
        accounts: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine: LifecycleEngine::new(
                Arc::clone(&requests),
                Arc::clone(&accounts),
                Arc::clone(&clock),
            ),
            feed: FeedAssembler::new(requests, Arc::clone(&accounts), clock),
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Required for Axum
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
