//! CampusGate Common Types
//!
//! Read models consumed from the Events System (events and fests keyed by
//! their correlation key) and the boundary parser for loosely-typed flags.
//! The Events System owns these records; this crate only describes the
//! shape the sync subsystem reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod flags;

pub use flags::allows_outsiders;

/// An event record as read from the Events System.
///
/// `allow_outsiders` arrives in mixed boolean/number/string forms from the
/// primary platform and must be normalized through [`flags::allows_outsiders`]
/// before any decision is taken on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Correlation key: the Events System event identifier
    pub key: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    /// Loosely-typed "allow outsiders" flag, normalized at the boundary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_outsiders: Option<serde_json::Value>,

    /// Correlation key of the parent fest, if the event belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fest_key: Option<String>,

    /// Cap on outside visitors, when the organiser set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outsider_max: Option<u32>,

    /// Overall participant estimate for the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_participants: Option<u32>,
}

impl EventRecord {
    /// Normalized "allow outsiders" decision for this event
    pub fn admits_outsiders(&self) -> bool {
        allows_outsiders(self.allow_outsiders.as_ref())
    }
}

/// A fest record as read from the Events System.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FestRecord {
    /// Correlation key: the Events System fest identifier
    pub key: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_outsiders: Option<serde_json::Value>,
}

impl FestRecord {
    pub fn admits_outsiders(&self) -> bool {
        allows_outsiders(self.allow_outsiders.as_ref())
    }
}

/// Fest lookup consumed from the Events System.
///
/// The suppression policy reads an event's parent fest through this trait;
/// the Events System owns the backing store.
#[async_trait]
pub trait FestDirectory: Send + Sync {
    async fn fest_by_key(&self, key: &str) -> anyhow::Result<Option<FestRecord>>;
}

/// A fest directory over records the caller already holds.
///
/// The Events System write path supplies the parent fest inline with a push
/// request; this wraps those records for the policy lookup.
pub struct InlineFestDirectory {
    fests: Vec<FestRecord>,
}

impl InlineFestDirectory {
    pub fn new(fests: Vec<FestRecord>) -> Self {
        Self { fests }
    }

    pub fn single(fest: Option<FestRecord>) -> Self {
        Self {
            fests: fest.into_iter().collect(),
        }
    }
}

#[async_trait]
impl FestDirectory for InlineFestDirectory {
    async fn fest_by_key(&self, key: &str) -> anyhow::Result<Option<FestRecord>> {
        Ok(self.fests.iter().find(|f| f.key == key).cloned())
    }
}
