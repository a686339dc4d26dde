//! Router assembly.

use crate::{handlers, state::AppState};
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router over the given state.
///
/// Identity is asserted per-route by the [`crate::extractors::Identity`]
/// extractor; health endpoints stay outside the `/api` surface and need no
/// identity.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/requests",
            get(handlers::requests::feed).post(handlers::requests::create),
        )
        .route(
            "/requests/:id",
            get(handlers::requests::get).delete(handlers::requests::delete),
        )
        .route("/requests/:id/accept", put(handlers::requests::accept))
        .route("/requests/:id/complete", put(handlers::requests::complete))
        .route("/users/my-requests", get(handlers::users::my_requests))
        .route("/users/my-responses", get(handlers::users::my_responses))
        .route("/users/location", put(handlers::users::update_location));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
