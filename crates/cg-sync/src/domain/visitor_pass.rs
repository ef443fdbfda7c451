//! Visitor Pass Entity
//!
//! A gate-entry credential for one specific non-member attendee.
//! Immutable after creation; no revoke or update path exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pass status. Passes are created `Approved`: the existence of the
/// approved entry they reference already implies authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassStatus {
    Approved,
}

/// Identity of the visitor the pass admits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitorIdentity {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_no: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorPass {
    #[serde(rename = "_id")]
    pub id: String,

    /// Approved entry this pass grants entry to
    pub entry_id: String,

    pub visitor: VisitorIdentity,

    /// Event name as shown at the gate
    pub event_name: String,

    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,

    pub status: PassStatus,

    /// Service credential the pass was issued with
    pub issued_by: String,

    pub created_at: DateTime<Utc>,
}

impl VisitorPass {
    pub fn issue(
        entry_id: impl Into<String>,
        visitor: VisitorIdentity,
        event_name: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
        issued_by: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            entry_id: entry_id.into(),
            visitor,
            event_name: event_name.into(),
            valid_from,
            valid_until,
            status: PassStatus::Approved,
            issued_by: issued_by.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_is_approved_at_creation() {
        let now = Utc::now();
        let pass = VisitorPass::issue(
            "entry-1",
            VisitorIdentity {
                name: "Asha Rao".to_string(),
                email: Some("asha@example.com".to_string()),
                phone: None,
                register_no: None,
            },
            "Robotics Demo",
            now,
            now + chrono::Duration::hours(6),
            "svc-key",
        );
        assert_eq!(pass.status, PassStatus::Approved);
        assert_eq!(pass.entry_id, "entry-1");
    }
}
