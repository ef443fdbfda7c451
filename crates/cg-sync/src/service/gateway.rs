//! Sync Gateway
//!
//! Idempotently upserts an event or fest into the Access System as a
//! pending sync request keyed by its correlation key. Repeated pushes
//! refresh mutable fields in place; the unique index on the correlation
//! key (not application-level check-then-insert) guarantees at most one
//! request per key.

use cg_common::{EventRecord, FestRecord};
use chrono::Utc;
use tracing::{error, info};

use crate::client::AccessClient;
use crate::domain::{SyncKind, SyncRequest, SyncRequestDetails};
use crate::error::{Result, SyncError};
use crate::repository::InsertOutcome;
use crate::service::OrganiserMapper;

/// Capacity fallback for events that carry no estimate at all
const DEFAULT_EVENT_MAX: u32 = 100;

/// Fixed fest estimates: child events covered by the fest are not pushed
/// individually, so the aggregate runs high
const FEST_EXPECTED: u32 = 500;
const FEST_MAX: u32 = 1000;

#[derive(Clone)]
pub struct SyncGateway {
    client: AccessClient,
    mapper: OrganiserMapper,
}

impl SyncGateway {
    pub fn new(client: AccessClient) -> Self {
        let mapper = OrganiserMapper::new(client.clone());
        Self { client, mapper }
    }

    /// Push an event to the Access System as a pending sync request.
    ///
    /// Returns `Ok(None)` without any store call when the integration is
    /// disabled. Otherwise resolves the organiser, then upserts by
    /// correlation key: an existing request keeps its id and status and
    /// has description/dates/estimates refreshed; an absent one is
    /// inserted as PENDING.
    pub async fn push_event(
        &self,
        event: &EventRecord,
        organiser_email: &str,
        organiser_name: Option<String>,
    ) -> Result<Option<SyncRequest>> {
        let Some(handle) = self.client.handle_opt() else {
            return Ok(None);
        };

        let (expected, max) = event_estimates(event);
        let organiser_id = self
            .mapper
            .ensure_organiser(organiser_email, organiser_name, event.department.clone())
            .await
            .map_err(|e| log_push_error("event", &event.name, &event.key, e))?;

        let request = SyncRequest::pending(
            event.key.clone(),
            SyncKind::Event,
            event.department.clone().unwrap_or_else(|| crate::domain::DEFAULT_DEPARTMENT.to_string()),
            event.name.clone(),
            event.description.clone(),
            event.starts_at,
            event.ends_at,
            expected,
            max,
            organiser_id,
            handle.service_key.clone(),
        );

        self.upsert("event", request)
            .await
            .map(Some)
            .map_err(|e| log_push_error("event", &event.name, &event.key, e))
    }

    /// Push a fest as an aggregate sync request.
    ///
    /// Same contract as [`push_event`](Self::push_event), with the FEST
    /// label and fixed higher estimates (expected 500 / max 1000).
    pub async fn push_fest(
        &self,
        fest: &FestRecord,
        organiser_email: &str,
        organiser_name: Option<String>,
    ) -> Result<Option<SyncRequest>> {
        let Some(handle) = self.client.handle_opt() else {
            return Ok(None);
        };

        let organiser_id = self
            .mapper
            .ensure_organiser(organiser_email, organiser_name, fest.department.clone())
            .await
            .map_err(|e| log_push_error("fest", &fest.name, &fest.key, e))?;

        let request = SyncRequest::pending(
            fest.key.clone(),
            SyncKind::Fest,
            fest.department.clone().unwrap_or_else(|| crate::domain::DEFAULT_DEPARTMENT.to_string()),
            fest.name.clone(),
            fest.description.clone(),
            fest.starts_at,
            fest.ends_at,
            FEST_EXPECTED,
            FEST_MAX,
            organiser_id,
            handle.service_key.clone(),
        );

        self.upsert("fest", request)
            .await
            .map(Some)
            .map_err(|e| log_push_error("fest", &fest.name, &fest.key, e))
    }

    /// Upsert by correlation key. Insert conflicts mean a concurrent first
    /// push won the unique index; the loser re-reads through the update
    /// path instead of erroring.
    async fn upsert(&self, kind: &str, request: SyncRequest) -> Result<SyncRequest> {
        let handle = self.client.handle()?;
        let requests = &handle.stores.requests;
        let key = request.correlation_key.clone();

        if let Some(existing) = requests.find_by_key(&key).await? {
            let mut details = request.details();
            details.updated_at = Utc::now();
            let updated = requests.update_details(&key, &details).await?.ok_or_else(|| {
                SyncError::upstream(format!("sync request {} disappeared during update", key))
            })?;
            info!(kind = %kind, correlation_key = %key, request_id = %existing.id, "Refreshed pending sync request");
            return Ok(updated);
        }

        match requests.insert(&request).await? {
            InsertOutcome::Inserted => {
                info!(kind = %kind, correlation_key = %key, request_id = %request.id, "Created pending sync request");
                Ok(request)
            }
            InsertOutcome::Conflict => {
                let mut details = request.details();
                details.updated_at = Utc::now();
                requests.update_details(&key, &details).await?.ok_or_else(|| {
                    SyncError::upstream(format!("sync request {} conflicted on insert but is not readable", key))
                })
            }
        }
    }
}

/// `max = outsider_max ?? total_participants ?? 100`;
/// `expected = min(outsider_max ?? max, max)`
fn event_estimates(event: &EventRecord) -> (u32, u32) {
    let max = event
        .outsider_max
        .or(event.total_participants)
        .unwrap_or(DEFAULT_EVENT_MAX);
    let expected = event.outsider_max.unwrap_or(max).min(max);
    (expected, max)
}

fn log_push_error(kind: &str, name: &str, key: &str, e: SyncError) -> SyncError {
    error!(kind = %kind, name = %name, correlation_key = %key, error = %e, "Sync push failed");
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(outsider_max: Option<u32>, total: Option<u32>) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            key: "EVT-1".to_string(),
            name: "Robotics Demo".to_string(),
            description: None,
            department: None,
            starts_at: now,
            ends_at: now,
            allow_outsiders: Some(serde_json::json!(true)),
            fest_key: None,
            outsider_max,
            total_participants: total,
        }
    }

    #[test]
    fn test_estimates_default_to_100() {
        assert_eq!(event_estimates(&event(None, None)), (100, 100));
    }

    #[test]
    fn test_estimates_fall_back_to_total_participants() {
        assert_eq!(event_estimates(&event(None, Some(250))), (250, 250));
    }

    #[test]
    fn test_outsider_max_bounds_both() {
        assert_eq!(event_estimates(&event(Some(40), Some(250))), (40, 40));
    }

    #[test]
    fn test_fest_defaults_run_high() {
        assert_eq!((FEST_EXPECTED, FEST_MAX), (500, 1000));
    }
}
