//! Sync API
//!
//! Push endpoints for the Events System write path and the resolution
//! lookup for its registration path. Pushes are best-effort: they are
//! submitted to the background channel and the caller's write flow
//! succeeds regardless of the push outcome.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use cg_common::{EventRecord, FestRecord, InlineFestDirectory};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiError;
use crate::client::AccessClient;
use crate::domain::ApprovedEntry;
use crate::error::SyncError;
use crate::service::{ApprovalResolver, BackgroundSync, SuppressionPolicy};

/// Sync API state
#[derive(Clone)]
pub struct SyncState {
    pub client: AccessClient,
    pub policy: SuppressionPolicy,
    pub background: BackgroundSync,
    pub resolver: ApprovalResolver,
}

pub fn sync_router(state: SyncState) -> Router {
    Router::new()
        .route("/events", post(push_event))
        .route("/fests", post(push_fest))
        .route("/requests/:key/resolution", get(resolution))
        .with_state(state)
}

/// Push request for an event, with its parent fest supplied inline by the
/// Events System write path (used for the suppression decision).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushEventRequest {
    pub event: EventRecord,
    pub fest: Option<FestRecord>,
    pub organiser_email: String,
    pub organiser_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushFestRequest {
    pub fest: FestRecord,
    pub organiser_email: String,
    pub organiser_name: Option<String>,
}

/// Whether the push was submitted, and why not when it wasn't
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PushResponse {
    fn accepted() -> Self {
        Self { accepted: true, reason: None }
    }

    fn skipped(reason: &str) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Submit an event for synchronization with the Access System
#[utoipa::path(
    post,
    path = "/sync/events",
    request_body = PushEventRequest,
    responses(
        (status = 202, description = "Push submitted", body = PushResponse),
        (status = 200, description = "Push not warranted for this event", body = PushResponse),
        (status = 400, description = "Malformed input", body = ApiError),
    ),
    tag = "sync"
)]
pub async fn push_event(
    State(state): State<SyncState>,
    Json(req): Json<PushEventRequest>,
) -> Result<(StatusCode, Json<PushResponse>), SyncError> {
    if req.organiser_email.trim().is_empty() {
        return Err(SyncError::validation("organiser email is required"));
    }
    if !state.client.is_enabled() {
        return Ok((StatusCode::OK, Json(PushResponse::skipped("integration disabled"))));
    }

    let fests = InlineFestDirectory::single(req.fest);
    if !state.policy.should_push(&req.event, &fests).await {
        return Ok((StatusCode::OK, Json(PushResponse::skipped("suppressed by policy"))));
    }

    state
        .background
        .submit_event(req.event, req.organiser_email, req.organiser_name);
    Ok((StatusCode::ACCEPTED, Json(PushResponse::accepted())))
}

/// Submit a fest for synchronization with the Access System
#[utoipa::path(
    post,
    path = "/sync/fests",
    request_body = PushFestRequest,
    responses(
        (status = 202, description = "Push submitted", body = PushResponse),
        (status = 200, description = "Push not warranted", body = PushResponse),
        (status = 400, description = "Malformed input", body = ApiError),
    ),
    tag = "sync"
)]
pub async fn push_fest(
    State(state): State<SyncState>,
    Json(req): Json<PushFestRequest>,
) -> Result<(StatusCode, Json<PushResponse>), SyncError> {
    if req.organiser_email.trim().is_empty() {
        return Err(SyncError::validation("organiser email is required"));
    }
    if !state.client.is_enabled() {
        return Ok((StatusCode::OK, Json(PushResponse::skipped("integration disabled"))));
    }
    if !req.fest.admits_outsiders() {
        return Ok((StatusCode::OK, Json(PushResponse::skipped("fest does not admit outsiders"))));
    }

    state
        .background
        .submit_fest(req.fest, req.organiser_email, req.organiser_name);
    Ok((StatusCode::ACCEPTED, Json(PushResponse::accepted())))
}

/// Approved entry DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: String,
    pub correlation_key: String,
    pub display_name: String,
    pub venue: Option<String>,
    pub approved_at: String,
}

impl From<ApprovedEntry> for EntryResponse {
    fn from(e: ApprovedEntry) -> Self {
        Self {
            id: e.id,
            correlation_key: e.correlation_key,
            display_name: e.display_name,
            venue: e.venue,
            approved_at: e.approved_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse {
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryResponse>,
}

/// Look up whether a pushed request has been approved
#[utoipa::path(
    get,
    path = "/sync/requests/{key}/resolution",
    params(("key" = String, Path, description = "Correlation key of the pushed event or fest")),
    responses(
        (status = 200, description = "Resolution state", body = ResolutionResponse),
        (status = 500, description = "Approved request without approved entry", body = ApiError),
    ),
    tag = "sync"
)]
pub async fn resolution(
    State(state): State<SyncState>,
    Path(key): Path<String>,
) -> Result<Json<ResolutionResponse>, SyncError> {
    let entry = state.resolver.resolve(&key).await?;
    Ok(Json(ResolutionResponse {
        approved: entry.is_some(),
        entry: entry.map(EntryResponse::from),
    }))
}
