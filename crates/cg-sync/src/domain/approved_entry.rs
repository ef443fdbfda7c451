//! Approved Entry Entity
//!
//! Created by the Access System's own approval workflow when a human
//! approves a sync request (1:1 with the approved request). This
//! subsystem only reads it, never writes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedEntry {
    #[serde(rename = "_id")]
    pub id: String,

    /// The sync request this entry approves
    pub request_id: String,

    /// Denormalized from the request for gate-side display
    pub correlation_key: String,

    pub display_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    pub approved_at: DateTime<Utc>,
}
