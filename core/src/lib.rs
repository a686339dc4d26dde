//! # HelpHive Core
//!
//! Domain model and business rules for the HelpHive emergency-assistance
//! coordination platform.
//!
//! This crate contains everything with real invariants and nothing else:
//!
//! - **Types**: the [`types::HelpRequest`] entity, the closed category /
//!   urgency / status / role enumerations and the id newtypes
//! - **Distance Calculator**: pure haversine great-circle distance
//!   ([`distance::distance_km`])
//! - **Store contracts**: [`store::RequestStore`] and [`store::AccountStore`],
//!   implemented by `helphive-postgres` (production) and `helphive-testing`
//!   (in-memory, deterministic)
//! - **Lifecycle Engine**: the request state machine
//!   ([`lifecycle::LifecycleEngine`]) — creation, acceptance, completion,
//!   deletion and the expiry sweep
//! - **Feed Assembler**: the ranked, enriched request list
//!   ([`feed::FeedAssembler`])
//!
//! ## Architecture Principles
//!
//! - Explicit context: caller identity is a parameter of every operation,
//!   never ambient state
//! - Closed tagged enumerations with exhaustive matching, no string
//!   comparison in the state machine
//! - Atomic precondition checks: the stores expose conditional updates
//!   (`accept_if_open`, `complete_if_accepted`) so that two concurrent
//!   accepts can never both succeed
//! - Injected time via [`environment::Clock`] so expiry is testable
//!
//! ## State Machine
//!
//! ```text
//!             accept              complete
//!   Open ──────────────► Accepted ─────────► Completed (terminal)
//!     │
//!     │ expires_at < now (sweep)
//!     ▼
//!   Expired (terminal)
//! ```

pub mod distance;
pub mod environment;
pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod store;
pub mod types;

pub use environment::{Clock, SystemClock};
pub use error::{CoreError, Result};
pub use feed::{EnrichedHelpRequest, FeedAssembler};
pub use lifecycle::LifecycleEngine;
pub use store::{AccountStore, RequestStore};
pub use types::{
    Account, AccountId, Coordinates, HelpCategory, HelpRequest, NewHelpRequest, RequestFilter,
    RequestId, RequestStatus, Role, Urgency,
};
