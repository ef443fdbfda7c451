//! Passes API
//!
//! Registration-path endpoint issuing gate-entry passes for non-member
//! attendees. Unlike the push side, failures here surface to the caller:
//! granting entry depends on them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiError;
use crate::client::AccessClient;
use crate::domain::VisitorIdentity;
use crate::error::SyncError;
use crate::service::issuer::pass_verification_url;
use crate::service::{ApprovalResolver, PassIssuer};

/// Passes API state
#[derive(Clone)]
pub struct PassesState {
    pub client: AccessClient,
    pub resolver: ApprovalResolver,
    pub issuer: PassIssuer,
}

pub fn passes_router(state: PassesState) -> Router {
    Router::new().route("/", post(create_pass)).with_state(state)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassRequest {
    /// Correlation key of the event or fest the visitor registered for
    pub correlation_key: String,

    pub visitor: VisitorIdentity,

    /// Event name as shown at the gate
    pub event_name: String,

    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassResponse {
    pub id: String,
    pub entry_id: String,
    pub event_name: String,
    pub status: String,
    pub valid_from: String,
    pub valid_until: String,
    /// Deterministic verification reference for the gate
    pub verification_url: String,
}

/// Issue a visitor pass for a registered non-member attendee
#[utoipa::path(
    post,
    path = "/passes",
    request_body = CreatePassRequest,
    responses(
        (status = 201, description = "Pass issued", body = PassResponse),
        (status = 400, description = "Malformed input", body = ApiError),
        (status = 409, description = "Request not approved (or never pushed)", body = ApiError),
        (status = 500, description = "Approved request without approved entry", body = ApiError),
        (status = 503, description = "Integration disabled", body = ApiError),
    ),
    tag = "passes"
)]
pub async fn create_pass(
    State(state): State<PassesState>,
    Json(req): Json<CreatePassRequest>,
) -> Result<(StatusCode, Json<PassResponse>), PassApiError> {
    if !state.client.is_enabled() {
        return Err(SyncError::IntegrationDisabled.into());
    }

    let entry = state
        .resolver
        .resolve(&req.correlation_key)
        .await?
        .ok_or_else(|| PassApiError::NotApproved(req.correlation_key.clone()))?;

    let pass = state
        .issuer
        .create_visitor_pass(req.visitor, &req.event_name, req.valid_from, req.valid_until, Some(&entry))
        .await?
        .ok_or(SyncError::IntegrationDisabled)?;

    let base = &state.client.handle()?.public_base_url;
    let response = PassResponse {
        verification_url: pass_verification_url(base, &pass.id),
        id: pass.id,
        entry_id: pass.entry_id,
        event_name: pass.event_name,
        status: "APPROVED".to_string(),
        valid_from: pass.valid_from.to_rfc3339(),
        valid_until: pass.valid_until.to_rfc3339(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Pass-path errors: the sync taxonomy plus the not-ready outcome, which
/// is a conflict for the caller rather than a server failure.
#[derive(Debug)]
pub enum PassApiError {
    NotApproved(String),
    Sync(SyncError),
}

impl From<SyncError> for PassApiError {
    fn from(e: SyncError) -> Self {
        Self::Sync(e)
    }
}

impl axum::response::IntoResponse for PassApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotApproved(key) => (
                StatusCode::CONFLICT,
                Json(ApiError::new(
                    "NOT_APPROVED",
                    format!("request {} is not approved in the Access System", key),
                )),
            )
                .into_response(),
            Self::Sync(e) => e.into_response(),
        }
    }
}
