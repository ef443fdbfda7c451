//! Background Sync Submission
//!
//! Push-path failures must never block the primary event/fest creation
//! flow. Instead of unawaited fire-and-forget calls, pushes are explicit
//! task submissions: the outcome is logged with its operation context and
//! also handed back on a oneshot channel for callers that want to observe
//! completion.

use cg_common::{EventRecord, FestRecord};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::domain::SyncRequest;
use crate::error::SyncError;
use crate::service::SyncGateway;

/// Outcome of one background push
#[derive(Debug)]
pub struct PushOutcome {
    pub correlation_key: String,
    pub result: Result<Option<SyncRequest>, SyncError>,
}

#[derive(Clone)]
pub struct BackgroundSync {
    gateway: SyncGateway,
}

impl BackgroundSync {
    pub fn new(gateway: SyncGateway) -> Self {
        Self { gateway }
    }

    /// Submit an event push. Returns immediately; the receiver resolves
    /// with the outcome once the push completes. Dropping the receiver is
    /// fine: the outcome is still logged.
    pub fn submit_event(
        &self,
        event: EventRecord,
        organiser_email: String,
        organiser_name: Option<String>,
    ) -> oneshot::Receiver<PushOutcome> {
        let gateway = self.gateway.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = gateway.push_event(&event, &organiser_email, organiser_name).await;
            report("event", &event.name, &event.key, &result);
            let _ = tx.send(PushOutcome {
                correlation_key: event.key.clone(),
                result,
            });
        });

        rx
    }

    /// Submit a fest push; same contract as [`submit_event`](Self::submit_event).
    pub fn submit_fest(
        &self,
        fest: FestRecord,
        organiser_email: String,
        organiser_name: Option<String>,
    ) -> oneshot::Receiver<PushOutcome> {
        let gateway = self.gateway.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = gateway.push_fest(&fest, &organiser_email, organiser_name).await;
            report("fest", &fest.name, &fest.key, &result);
            let _ = tx.send(PushOutcome {
                correlation_key: fest.key.clone(),
                result,
            });
        });

        rx
    }
}

fn report(kind: &str, name: &str, key: &str, result: &Result<Option<SyncRequest>, SyncError>) {
    match result {
        Ok(Some(req)) => {
            info!(kind = %kind, correlation_key = %key, request_id = %req.id, "Background sync push completed");
        }
        Ok(None) => {}
        Err(e) => {
            error!(kind = %kind, name = %name, correlation_key = %key, error = %e, "Background sync push failed");
        }
    }
}
