//! Suppression Policy
//!
//! Decides, per event, whether synchronization to the Access System
//! should happen at all. An event under a fest that already admits
//! outsiders must never produce its own sync request: the fest-level
//! push covers the event's capacity and a second push would double-count
//! participants.

use cg_common::{EventRecord, FestDirectory};
use tracing::{debug, warn};

#[derive(Clone, Default)]
pub struct SuppressionPolicy;

impl SuppressionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Whether the event warrants its own sync request.
    ///
    /// A fest lookup failure fails open: the event is still represented
    /// individually rather than silently dropped.
    pub async fn should_push(&self, event: &EventRecord, fests: &dyn FestDirectory) -> bool {
        if !event.admits_outsiders() {
            return false;
        }

        let Some(fest_key) = event.fest_key.as_deref() else {
            return true;
        };

        match fests.fest_by_key(fest_key).await {
            Ok(Some(fest)) if fest.admits_outsiders() => {
                debug!(
                    event_key = %event.key,
                    fest_key = %fest_key,
                    "Suppressing event push; parent fest already admits outsiders"
                );
                false
            }
            Ok(_) => true,
            Err(e) => {
                warn!(
                    event_key = %event.key,
                    fest_key = %fest_key,
                    error = %e,
                    "Fest lookup failed; pushing event individually"
                );
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cg_common::FestRecord;
    use chrono::Utc;
    use serde_json::json;

    struct Fests(Vec<FestRecord>);

    #[async_trait]
    impl FestDirectory for Fests {
        async fn fest_by_key(&self, key: &str) -> anyhow::Result<Option<FestRecord>> {
            Ok(self.0.iter().find(|f| f.key == key).cloned())
        }
    }

    struct BrokenFests;

    #[async_trait]
    impl FestDirectory for BrokenFests {
        async fn fest_by_key(&self, _key: &str) -> anyhow::Result<Option<FestRecord>> {
            anyhow::bail!("events store unreachable")
        }
    }

    fn event(allow: serde_json::Value, fest_key: Option<&str>) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            key: "EVT-1".to_string(),
            name: "Robotics Demo".to_string(),
            description: None,
            department: Some("CSE".to_string()),
            starts_at: now,
            ends_at: now + chrono::Duration::hours(4),
            allow_outsiders: Some(allow),
            fest_key: fest_key.map(String::from),
            outsider_max: None,
            total_participants: None,
        }
    }

    fn fest(key: &str, allow: serde_json::Value) -> FestRecord {
        let now = Utc::now();
        FestRecord {
            key: key.to_string(),
            name: "TechFest".to_string(),
            description: None,
            department: None,
            starts_at: now,
            ends_at: now + chrono::Duration::days(2),
            allow_outsiders: Some(allow),
        }
    }

    #[tokio::test]
    async fn false_flag_never_pushes_regardless_of_fest() {
        let policy = SuppressionPolicy::new();
        let fests = Fests(vec![fest("F1", json!(false))]);
        for raw in [json!(false), json!(0), json!("false"), json!("yes"), json!(null)] {
            assert!(!policy.should_push(&event(raw, Some("F1")), &fests).await);
        }
    }

    #[tokio::test]
    async fn standalone_event_with_true_flag_pushes() {
        let policy = SuppressionPolicy::new();
        let fests = Fests(vec![]);
        for raw in [json!(true), json!(1), json!("true"), json!("1")] {
            assert!(policy.should_push(&event(raw, None), &fests).await);
        }
    }

    #[tokio::test]
    async fn fest_admitting_outsiders_suppresses_child_event() {
        let policy = SuppressionPolicy::new();
        let fests = Fests(vec![fest("F1", json!("1"))]);
        assert!(!policy.should_push(&event(json!(true), Some("F1")), &fests).await);
    }

    #[tokio::test]
    async fn fest_not_admitting_outsiders_leaves_event_pushed() {
        let policy = SuppressionPolicy::new();
        let fests = Fests(vec![fest("F1", json!(false))]);
        assert!(policy.should_push(&event(json!(true), Some("F1")), &fests).await);
    }

    #[tokio::test]
    async fn unknown_fest_leaves_event_pushed() {
        let policy = SuppressionPolicy::new();
        let fests = Fests(vec![]);
        assert!(policy.should_push(&event(json!(true), Some("F-missing")), &fests).await);
    }

    #[tokio::test]
    async fn fest_lookup_failure_fails_open() {
        let policy = SuppressionPolicy::new();
        assert!(policy.should_push(&event(json!(true), Some("F1")), &BrokenFests).await);
    }
}
