//! Pass Issuer
//!
//! Issues a gate-entry pass for one specific non-member attendee. The
//! caller must have resolved the approved entry first; resolver and
//! issuer are deliberately not auto-composed so "check" and "act" stay
//! separately testable.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::client::AccessClient;
use crate::domain::{ApprovedEntry, VisitorIdentity, VisitorPass};
use crate::error::{Result, SyncError};

#[derive(Clone)]
pub struct PassIssuer {
    client: AccessClient,
}

impl PassIssuer {
    pub fn new(client: AccessClient) -> Self {
        Self { client }
    }

    /// Create an approved visitor pass against a resolved approved entry.
    ///
    /// A missing entry is a validation failure and performs no store
    /// write: authorization was never established. The pass is created
    /// APPROVED; the entry's existence already implies it. Failures here
    /// surface to the caller, because granting entry depends on them.
    pub async fn create_visitor_pass(
        &self,
        visitor: VisitorIdentity,
        event_name: &str,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
        entry: Option<&ApprovedEntry>,
    ) -> Result<Option<VisitorPass>> {
        let entry = entry.ok_or_else(|| {
            SyncError::validation("visitor pass requires a resolved approved entry")
        })?;
        if visitor.name.trim().is_empty() {
            return Err(SyncError::validation("visitor name is required"));
        }
        if valid_until <= valid_from {
            return Err(SyncError::validation("pass validity window is empty or inverted"));
        }

        let Some(handle) = self.client.handle_opt() else {
            return Ok(None);
        };

        let pass = VisitorPass::issue(
            entry.id.clone(),
            visitor,
            event_name,
            valid_from,
            valid_until,
            handle.service_key.clone(),
        );
        handle.stores.passes.insert(&pass).await?;

        info!(
            pass_id = %pass.id,
            entry_id = %entry.id,
            event_name = %event_name,
            "Issued visitor pass"
        );
        Ok(Some(pass))
    }
}

/// Verification reference for a pass: a deterministic function of the
/// Access System public address and the pass id. Carries no signature.
pub fn pass_verification_url(public_base_url: &str, pass_id: &str) -> String {
    format!("{}/gate/verify/{}", public_base_url.trim_end_matches('/'), pass_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_url_is_deterministic() {
        let a = pass_verification_url("https://access.campus.example", "pass-1");
        let b = pass_verification_url("https://access.campus.example", "pass-1");
        assert_eq!(a, b);
        assert_eq!(a, "https://access.campus.example/gate/verify/pass-1");
    }

    #[test]
    fn test_verification_url_trims_trailing_slash() {
        assert_eq!(
            pass_verification_url("https://access.campus.example/", "pass-1"),
            "https://access.campus.example/gate/verify/pass-1"
        );
    }
}
