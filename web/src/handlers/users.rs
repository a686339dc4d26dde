//! Caller-scoped endpoints.

use crate::{error::AppError, extractors::Identity, state::AppState};
use axum::{Json, extract::State};
use helphive_core::types::{Coordinates, HelpRequest, RequestFilter};
use serde::Serialize;

/// Acknowledgement body for location updates.
#[derive(Debug, Serialize)]
pub struct LocationAck {
    /// Human-readable confirmation.
    pub message: String,
    /// The coordinates now on record.
    pub coordinates: Coordinates,
}

/// `GET /api/users/my-requests` — requests the caller created, any status,
/// newest first.
pub async fn my_requests(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<HelpRequest>>, AppError> {
    let filter = RequestFilter::with_requester(identity.account_id);
    let requests = state.engine.list(&filter).await?;
    Ok(Json(requests))
}

/// `GET /api/users/my-responses` — requests the caller accepted as a
/// volunteer, newest first.
pub async fn my_responses(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<HelpRequest>>, AppError> {
    let requests = state
        .engine
        .list_by_volunteer(identity.account_id)
        .await?;
    Ok(Json(requests))
}

/// `PUT /api/users/location` — report the caller's position, used for
/// distance ranking in the feed.
pub async fn update_location(
    State(state): State<AppState>,
    identity: Identity,
    Json(coordinates): Json<Coordinates>,
) -> Result<Json<LocationAck>, AppError> {
    coordinates.validate()?;
    state
        .accounts
        .update_location(identity.account_id, coordinates)
        .await?;
    Ok(Json(LocationAck {
        message: "Location updated successfully".to_string(),
        coordinates,
    }))
}
