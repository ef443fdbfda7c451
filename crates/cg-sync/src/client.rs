//! Access System Client
//!
//! The connection to the Access System is an explicitly constructed,
//! tagged value: `Disabled` when the endpoint/credential pair is not
//! configured, `Enabled` with a store handle otherwise. The check happens
//! once, at construction; every operation consults the tag instead of a
//! nullable global.

use std::sync::Arc;

use tracing::info;

use crate::config::AccessConfig;
use crate::error::{Result, SyncError};
use crate::repository::{
    ApprovedEntryStore, MongoApprovedEntryStore, MongoOrganiserStore, MongoSyncRequestStore,
    MongoVisitorPassStore, OrganiserStore, SyncRequestStore, VisitorPassStore,
};

/// Stores for the four Access System record kinds
#[derive(Clone)]
pub struct AccessStores {
    pub organisers: Arc<dyn OrganiserStore>,
    pub requests: Arc<dyn SyncRequestStore>,
    pub entries: Arc<dyn ApprovedEntryStore>,
    pub passes: Arc<dyn VisitorPassStore>,
}

/// Handle to an enabled Access System integration
pub struct AccessHandle {
    pub stores: AccessStores,
    /// Public base address for pass verification references
    pub public_base_url: String,
    /// Service credential stamped on every row this subsystem writes
    pub service_key: String,
}

impl AccessHandle {
    pub fn new(stores: AccessStores, public_base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            stores,
            public_base_url: public_base_url.into(),
            service_key: service_key.into(),
        }
    }
}

/// Typed Access System connection state
#[derive(Clone)]
pub enum AccessClient {
    Disabled,
    Enabled(Arc<AccessHandle>),
}

impl AccessClient {
    /// Construct the client from configuration, once per process.
    ///
    /// Missing endpoint or credential yields `Disabled`; every operation
    /// then short-circuits without any network or store call. When enabled,
    /// connects to the Access System store and creates the unique indexes
    /// both first-write races rely on.
    pub async fn connect(config: &AccessConfig) -> Result<Self> {
        let (Some(url), Some(key)) = (config.store_url.as_ref(), config.service_key.as_ref()) else {
            info!("Access System integration disabled (endpoint or credential not configured)");
            return Ok(Self::Disabled);
        };

        info!(database = %config.database, "Connecting to Access System store");
        let mongo = mongodb::Client::with_uri_str(url).await?;
        let db = mongo.database(&config.database);

        let organisers = MongoOrganiserStore::new(&db, config.op_timeout);
        let requests = MongoSyncRequestStore::new(&db, config.op_timeout);
        organisers.ensure_indexes().await?;
        requests.ensure_indexes().await?;

        let stores = AccessStores {
            organisers: Arc::new(organisers),
            requests: Arc::new(requests),
            entries: Arc::new(MongoApprovedEntryStore::new(&db, config.op_timeout)),
            passes: Arc::new(MongoVisitorPassStore::new(&db, config.op_timeout)),
        };

        Ok(Self::Enabled(Arc::new(AccessHandle::new(
            stores,
            config.public_base_url.clone(),
            key.clone(),
        ))))
    }

    /// Enabled client over caller-supplied stores (tests, alternative backends)
    pub fn enabled(handle: AccessHandle) -> Self {
        Self::Enabled(Arc::new(handle))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// The handle, or `IntegrationDisabled` for operations that cannot
    /// degrade to a no-op
    pub fn handle(&self) -> Result<&Arc<AccessHandle>> {
        match self {
            Self::Enabled(handle) => Ok(handle),
            Self::Disabled => Err(SyncError::IntegrationDisabled),
        }
    }

    /// The handle, or `None` for operations that no-op when disabled
    pub fn handle_opt(&self) -> Option<&Arc<AccessHandle>> {
        match self {
            Self::Enabled(handle) => Some(handle),
            Self::Disabled => None,
        }
    }
}
