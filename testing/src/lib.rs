//! # HelpHive Testing
//!
//! Testing utilities for the HelpHive core:
//!
//! - In-memory implementations of the store contracts with the same atomic
//!   conditional-update semantics as the Postgres stores
//! - Deterministic clocks ([`clock::FixedClock`], [`clock::ManualClock`])
//! - Fixture builders for accounts and request input
//!
//! Integration tests for the lifecycle engine and feed assembler live in
//! this member's `tests/` directory.
//!
//! ## Example
//!
//! ```ignore
//! use helphive_core::LifecycleEngine;
//! use helphive_testing::{clock::ManualClock, fixtures, stores::*};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn accept_flow() {
//!     let requests = Arc::new(InMemoryRequestStore::new());
//!     let accounts = Arc::new(InMemoryAccountStore::new());
//!     let clock = Arc::new(ManualClock::default());
//!     let engine = LifecycleEngine::new(requests, accounts.clone(), clock);
//!
//!     let volunteer = fixtures::volunteer("Val");
//!     accounts.insert(volunteer.clone());
//!     // ...
//! }
//! ```

pub mod clock;
pub mod fixtures;
pub mod stores;

pub use clock::{FixedClock, ManualClock};
pub use stores::{InMemoryAccountStore, InMemoryRequestStore, UnreliableAccountStore};
