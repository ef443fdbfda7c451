//! API Layer
//!
//! REST endpoints exposed to the Events System write and registration
//! paths. No other code path talks to the Access System.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::error::SyncError;

pub mod passes;
pub mod sync;

pub use passes::{passes_router, PassesState};
pub use sync::{sync_router, SyncState};

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            SyncError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION"),
            SyncError::IntegrationDisabled => (StatusCode::SERVICE_UNAVAILABLE, "INTEGRATION_DISABLED"),
            SyncError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM"),
            SyncError::Inconsistency { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INCONSISTENCY"),
        };
        (status, Json(ApiError::new(code, self.to_string()))).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampusGate Access Sync API",
        description = "Event/fest synchronization and visitor pass issuance for the campus Access System"
    ),
    paths(
        sync::push_event,
        sync::push_fest,
        sync::resolution,
        passes::create_pass,
    ),
    components(schemas(ApiError))
)]
pub struct SyncApiDoc;
