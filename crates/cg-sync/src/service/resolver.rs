//! Approval Resolver
//!
//! Looks up whether a previously pushed request has been approved and
//! returns the resulting approved entry, if any. Approval is driven
//! entirely by the Access System; it is only ever observed here.

use tracing::{debug, error};

use crate::client::AccessClient;
use crate::domain::{ApprovedEntry, SyncStatus};
use crate::error::{Result, SyncError};

#[derive(Clone)]
pub struct ApprovalResolver {
    client: AccessClient,
}

impl ApprovalResolver {
    pub fn new(client: AccessClient) -> Self {
        Self { client }
    }

    /// Resolve a correlation key to its approved entry.
    ///
    /// `Ok(None)` covers the normal non-error outcomes: integration
    /// disabled, never pushed, or pushed but not (yet) approved. An
    /// APPROVED request with no matching entry is an inconsistency,
    /// surfaced distinctly so callers alert instead of retrying.
    pub async fn resolve(&self, correlation_key: &str) -> Result<Option<ApprovedEntry>> {
        let Some(handle) = self.client.handle_opt() else {
            return Ok(None);
        };

        let Some(request) = handle.stores.requests.find_by_key(correlation_key).await.map_err(|e| {
            error!(correlation_key = %correlation_key, error = %e, "Sync request lookup failed");
            e
        })?
        else {
            debug!(correlation_key = %correlation_key, "No sync request for key; never pushed");
            return Ok(None);
        };

        if request.status != SyncStatus::Approved {
            debug!(
                correlation_key = %correlation_key,
                status = ?request.status,
                "Sync request not approved yet"
            );
            return Ok(None);
        }

        match handle.stores.entries.find_by_request(&request.id).await? {
            Some(entry) => Ok(Some(entry)),
            None => {
                let err = SyncError::inconsistency(correlation_key);
                error!(
                    correlation_key = %correlation_key,
                    request_id = %request.id,
                    name = %request.display_name,
                    "Approved sync request has no approved entry"
                );
                Err(err)
            }
        }
    }
}
