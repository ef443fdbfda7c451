//! Organiser Mapper
//!
//! Maps an Events System organiser identity (by email) to a stable
//! Access System account, creating one lazily on first use.

use tracing::{debug, info};

use crate::client::AccessClient;
use crate::domain::OrganiserIdentity;
use crate::error::{Result, SyncError};
use crate::repository::InsertOutcome;

#[derive(Clone)]
pub struct OrganiserMapper {
    client: AccessClient,
}

impl OrganiserMapper {
    pub fn new(client: AccessClient) -> Self {
        Self { client }
    }

    /// Look up or lazily create the Access System account for an organiser.
    ///
    /// Returns the stable account id. An existing account is returned
    /// unchanged; a new one is created with a freshly generated opaque
    /// secret that is never exposed to callers. Two simultaneous first
    /// calls for the same email resolve through the unique index on email:
    /// the losing insert re-reads and returns the winner's id.
    pub async fn ensure_organiser(
        &self,
        email: &str,
        display_name: Option<String>,
        department: Option<String>,
    ) -> Result<String> {
        if email.trim().is_empty() {
            return Err(SyncError::validation("organiser email is required"));
        }
        let handle = self.client.handle()?;
        let organisers = &handle.stores.organisers;

        if let Some(existing) = organisers.find_by_email(email).await? {
            debug!(email = %email, organiser_id = %existing.id, "Organiser already mapped");
            return Ok(existing.id);
        }

        let fresh = OrganiserIdentity::new(email, display_name, department);
        match organisers.insert(&fresh).await? {
            InsertOutcome::Inserted => {
                info!(email = %email, organiser_id = %fresh.id, "Created Access System organiser account");
                Ok(fresh.id)
            }
            InsertOutcome::Conflict => {
                // A concurrent first-call won the email index; theirs is canonical
                let winner = organisers.find_by_email(email).await?.ok_or_else(|| {
                    SyncError::upstream(format!("organiser {} conflicted on insert but is not readable", email))
                })?;
                debug!(email = %email, organiser_id = %winner.id, "Organiser created concurrently; using winner");
                Ok(winner.id)
            }
        }
    }
}
