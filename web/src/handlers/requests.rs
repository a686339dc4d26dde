//! Help-request endpoints.

use crate::{error::AppError, extractors::Identity, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use helphive_core::feed::EnrichedHelpRequest;
use helphive_core::types::{HelpRequest, NewHelpRequest, RequestFilter, RequestId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string for the feed listing.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Optional status filter, one of the lowercase wire values.
    pub status: Option<String>,
}

/// Acknowledgement body for deletions.
#[derive(Debug, Serialize)]
pub struct Ack {
    /// Human-readable confirmation.
    pub message: String,
}

/// `POST /api/requests` — create a request on behalf of the caller.
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<NewHelpRequest>,
) -> Result<(StatusCode, Json<HelpRequest>), AppError> {
    let request = state.engine.create(identity.account_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// `GET /api/requests` — the enriched, distance-ranked feed.
pub async fn feed(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<EnrichedHelpRequest>>, AppError> {
    let filter = match query.status {
        Some(raw) => RequestFilter::with_status(raw.parse()?),
        None => RequestFilter::default(),
    };
    let entries = state.feed.build(identity.account_id, &filter).await?;
    Ok(Json(entries))
}

/// `GET /api/requests/:id` — a single request, enriched with the requester
/// name but without a distance.
pub async fn get(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichedHelpRequest>, AppError> {
    let request = state.engine.get(RequestId::from_uuid(id)).await?;
    Ok(Json(state.feed.enrich_one(request).await))
}

/// `PUT /api/requests/:id/accept` — claim an open request as a volunteer.
pub async fn accept(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<HelpRequest>, AppError> {
    let request = state
        .engine
        .accept(RequestId::from_uuid(id), identity.account_id)
        .await?;
    Ok(Json(request))
}

/// `PUT /api/requests/:id/complete` — mark an accepted request resolved.
pub async fn complete(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<HelpRequest>, AppError> {
    let request = state
        .engine
        .complete(RequestId::from_uuid(id), identity.account_id)
        .await?;
    Ok(Json(request))
}

/// `DELETE /api/requests/:id` — remove a request the caller created.
pub async fn delete(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, AppError> {
    state
        .engine
        .delete(RequestId::from_uuid(id), identity.account_id)
        .await?;
    Ok(Json(Ack {
        message: "Request deleted successfully".to_string(),
    }))
}
