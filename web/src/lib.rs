//! Axum HTTP layer for HelpHive.
//!
//! This crate is the imperative shell around the coordination core: it
//! parses requests, asserts identity from the gateway headers, calls the
//! lifecycle engine or feed assembler, and maps [`helphive_core::error::CoreError`]
//! onto HTTP responses.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** identity, path, query, and JSON body
//! 3. **Call** the lifecycle engine or feed assembler
//! 4. **Map result** to a JSON response, or `CoreError` to an [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use helphive_web::{build_router, AppState};
//! use helphive_core::environment::SystemClock;
//! use helphive_postgres::{PostgresAccountStore, PostgresRequestStore};
//! use std::sync::Arc;
//!
//! let state = AppState::new(
//!     Arc::new(PostgresRequestStore::new(pool.clone())),
//!     Arc::new(PostgresAccountStore::new(pool)),
//!     Arc::new(SystemClock),
//! );
//! let app = build_router(state);
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use extractors::Identity;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
