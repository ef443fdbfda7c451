//! Organiser Identity Entity
//!
//! Maps an Events System organiser (by email) to a stable Access System
//! account. Created once on first use, never updated or deleted by this
//! subsystem.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Fallback department label when the organiser record carries none
pub const DEFAULT_DEPARTMENT: &str = "GENERAL";

/// An organiser account in the Access System, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganiserIdentity {
    #[serde(rename = "_id")]
    pub id: String,

    /// Natural key
    pub email: String,

    pub display_name: String,

    pub department: String,

    /// Opaque account secret generated at creation. Stored in the Access
    /// System; never returned by any operation of this subsystem.
    pub secret: String,

    pub created_at: DateTime<Utc>,
}

impl OrganiserIdentity {
    /// Build a new organiser account for first use.
    ///
    /// Display name defaults to the local part of the email, department to
    /// [`DEFAULT_DEPARTMENT`].
    pub fn new(email: impl Into<String>, display_name: Option<String>, department: Option<String>) -> Self {
        let email = email.into();
        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| local_part(&email).to_string());

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            display_name,
            department: department
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
            secret: generate_secret(),
            created_at: Utc::now(),
        }
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Freshly generated opaque secret for a new organiser account
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults_to_local_part() {
        let org = OrganiserIdentity::new("jane.doe@uni.edu", None, None);
        assert_eq!(org.display_name, "jane.doe");
        assert_eq!(org.department, DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_explicit_fields_kept() {
        let org = OrganiserIdentity::new(
            "jane.doe@uni.edu",
            Some("Jane Doe".to_string()),
            Some("CSE".to_string()),
        );
        assert_eq!(org.display_name, "Jane Doe");
        assert_eq!(org.department, "CSE");
    }

    #[test]
    fn test_blank_overrides_fall_back() {
        let org = OrganiserIdentity::new("jane@uni.edu", Some("  ".to_string()), Some("".to_string()));
        assert_eq!(org.display_name, "jane");
        assert_eq!(org.department, DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_secrets_are_unique_and_opaque() {
        let a = OrganiserIdentity::new("a@uni.edu", None, None);
        let b = OrganiserIdentity::new("b@uni.edu", None, None);
        assert_ne!(a.secret, b.secret);
        assert_eq!(a.secret.len(), 64);
    }
}
