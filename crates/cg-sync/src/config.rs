//! Access System configuration
//!
//! Two values toggle the whole integration: the store endpoint and the
//! service credential. Their joint presence is checked once per process
//! lifetime, when the client is constructed.

use std::time::Duration;

/// Default Access System public address for pass verification references
const DEFAULT_PUBLIC_BASE_URL: &str = "https://access.campus.example";

/// Default database name in the Access System store
const DEFAULT_DATABASE: &str = "campus_access";

/// Default per-call deadline for store round trips
const DEFAULT_OP_TIMEOUT_SECS: u64 = 10;

/// Access System connection configuration
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Access System store endpoint (MongoDB URL). Absent = disabled.
    pub store_url: Option<String>,
    /// Service credential identifying this platform to the Access System.
    /// Absent = disabled.
    pub service_key: Option<String>,
    /// Database name in the Access System store
    pub database: String,
    /// Public base address used for pass verification references
    pub public_base_url: String,
    /// Bounded deadline applied to every store call
    pub op_timeout: Duration,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            service_key: None,
            database: DEFAULT_DATABASE.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            op_timeout: Duration::from_secs(DEFAULT_OP_TIMEOUT_SECS),
        }
    }
}

impl AccessConfig {
    /// Read configuration from the environment.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `CG_ACCESS_STORE_URL` | - | Access System store URL |
    /// | `CG_ACCESS_SERVICE_KEY` | - | Service credential |
    /// | `CG_ACCESS_DB` | `campus_access` | Database name |
    /// | `CG_ACCESS_PUBLIC_URL` | `https://access.campus.example` | Verification base address |
    /// | `CG_ACCESS_TIMEOUT_SECS` | `10` | Per-call deadline |
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("CG_ACCESS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_OP_TIMEOUT_SECS);

        Self {
            store_url: std::env::var("CG_ACCESS_STORE_URL").ok().filter(|v| !v.is_empty()),
            service_key: std::env::var("CG_ACCESS_SERVICE_KEY").ok().filter(|v| !v.is_empty()),
            database: std::env::var("CG_ACCESS_DB").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            public_base_url: std::env::var("CG_ACCESS_PUBLIC_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
            op_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The integration is on only when both the endpoint and the service
    /// credential are present.
    pub fn is_enabled(&self) -> bool {
        self.store_url.is_some() && self.service_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_both_values() {
        let mut config = AccessConfig::default();
        assert!(!config.is_enabled());

        config.store_url = Some("mongodb://localhost:27017".to_string());
        assert!(!config.is_enabled());

        config.service_key = Some("svc-key".to_string());
        assert!(config.is_enabled());

        config.store_url = None;
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_defaults() {
        let config = AccessConfig::default();
        assert_eq!(config.database, "campus_access");
        assert_eq!(config.op_timeout, Duration::from_secs(10));
    }
}
