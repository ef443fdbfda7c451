//! Sync Request Entity
//!
//! The pending representation of a pushed event or fest awaiting human
//! approval in the Access System. Exactly one request exists per
//! correlation key; repeated pushes refresh mutable fields in place and
//! never touch id or status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the request represents on the Events System side.
///
/// Fests carry the FEST label so Access System reviewers read them as
/// aggregates covering their child events, not single events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncKind {
    Event,
    Fest,
}

/// Approval status of a sync request.
///
/// This subsystem only ever creates `Pending`; the approved/rejected
/// transitions are driven by the Access System and observed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    Pending,
    Approved,
    Rejected,
}

/// A synchronization request in the Access System store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    #[serde(rename = "_id")]
    pub id: String,

    /// Natural key: the Events System event or fest identifier
    pub correlation_key: String,

    pub kind: SyncKind,

    pub department: String,

    pub display_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    /// Expected outside visitors
    pub expected_visitors: u32,

    /// Maximum outside visitors the venue should admit
    pub max_visitors: u32,

    /// Access System account of the organiser (see OrganiserIdentity)
    pub organiser_id: String,

    /// Source tag identifying the pushing platform
    pub source: String,

    /// Service credential the push was made with
    pub requested_by: String,

    pub status: SyncStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields refreshed by a repeated push of the same correlation key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequestDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub expected_visitors: u32,
    pub max_visitors: u32,
    pub updated_at: DateTime<Utc>,
}

impl SyncRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn pending(
        correlation_key: impl Into<String>,
        kind: SyncKind,
        department: impl Into<String>,
        display_name: impl Into<String>,
        description: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        expected_visitors: u32,
        max_visitors: u32,
        organiser_id: impl Into<String>,
        requested_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            correlation_key: correlation_key.into(),
            kind,
            department: department.into(),
            display_name: display_name.into(),
            description,
            starts_at,
            ends_at,
            expected_visitors,
            max_visitors,
            organiser_id: organiser_id.into(),
            source: super::SOURCE_TAG.to_string(),
            requested_by: requested_by.into(),
            status: SyncStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// The details a repeated push is allowed to refresh
    pub fn details(&self) -> SyncRequestDetails {
        SyncRequestDetails {
            description: self.description.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            expected_visitors: self.expected_visitors,
            max_visitors: self.max_visitors,
            updated_at: self.updated_at,
        }
    }

    /// Apply refreshed details, leaving id and status untouched
    pub fn apply_details(&mut self, details: &SyncRequestDetails) {
        self.description = details.description.clone();
        self.starts_at = details.starts_at;
        self.ends_at = details.ends_at;
        self.expected_visitors = details.expected_visitors;
        self.max_visitors = details.max_visitors;
        self.updated_at = details.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SyncRequest {
        let now = Utc::now();
        SyncRequest::pending(
            "EVT-1",
            SyncKind::Event,
            "CSE",
            "Robotics Demo",
            Some("live demo".to_string()),
            now,
            now + chrono::Duration::hours(4),
            50,
            100,
            "org-1",
            "svc-key",
        )
    }

    #[test]
    fn test_pending_on_creation() {
        let req = request();
        assert_eq!(req.status, SyncStatus::Pending);
        assert_eq!(req.source, crate::domain::SOURCE_TAG);
        assert_eq!(req.correlation_key, "EVT-1");
    }

    #[test]
    fn test_apply_details_preserves_id_and_status() {
        let mut req = request();
        let id = req.id.clone();

        let mut details = req.details();
        details.description = Some("updated".to_string());
        details.expected_visitors = 80;
        details.updated_at = Utc::now();
        req.apply_details(&details);

        assert_eq!(req.id, id);
        assert_eq!(req.status, SyncStatus::Pending);
        assert_eq!(req.description.as_deref(), Some("updated"));
        assert_eq!(req.expected_visitors, 80);
    }
}
