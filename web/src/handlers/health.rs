//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::{error::AppError, state::AppState};
use axum::{extract::State, http::StatusCode};
use helphive_core::types::AccountId;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check dependencies (database, etc.).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness check: verifies the backing store answers a read.
///
/// The probe is a lookup of a random account id; `Ok(None)` proves the
/// round trip without requiring any fixture data.
///
/// # Status Codes
///
/// - 200 OK: store reachable
/// - 503 Service Unavailable: store unreachable
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), AppError> {
    state
        .accounts
        .get(AccountId::new())
        .await
        .map_err(|e| AppError::unavailable(format!("store not ready: {e}")))?;
    Ok((StatusCode::OK, "ready"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
