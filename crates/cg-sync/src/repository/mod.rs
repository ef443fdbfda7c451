//! Repository Layer
//!
//! Store traits for the four Access System record kinds plus their
//! MongoDB implementations. Both first-write races (organiser email,
//! request correlation key) are closed by unique indexes: the losing
//! insert surfaces [`InsertOutcome::Conflict`] and the caller re-reads,
//! never check-then-insert alone.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::error::{ErrorKind, WriteFailure};

use crate::domain::{ApprovedEntry, OrganiserIdentity, SyncRequest, SyncRequestDetails, VisitorPass};
use crate::error::{Result, SyncError};

pub mod approved_entry;
pub mod organiser;
pub mod sync_request;
pub mod visitor_pass;

pub use approved_entry::MongoApprovedEntryStore;
pub use organiser::MongoOrganiserStore;
pub use sync_request::MongoSyncRequestStore;
pub use visitor_pass::MongoVisitorPassStore;

/// Outcome of a uniqueness-constrained insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A concurrent writer won the unique index; re-read for their row
    Conflict,
}

#[async_trait]
pub trait OrganiserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<OrganiserIdentity>>;
    async fn insert(&self, organiser: &OrganiserIdentity) -> Result<InsertOutcome>;
}

#[async_trait]
pub trait SyncRequestStore: Send + Sync {
    async fn find_by_key(&self, correlation_key: &str) -> Result<Option<SyncRequest>>;
    async fn insert(&self, request: &SyncRequest) -> Result<InsertOutcome>;
    /// Refresh mutable fields in place; id and status are never touched.
    /// Returns the updated row, or `None` when no row exists for the key.
    async fn update_details(
        &self,
        correlation_key: &str,
        details: &SyncRequestDetails,
    ) -> Result<Option<SyncRequest>>;
}

#[async_trait]
pub trait ApprovedEntryStore: Send + Sync {
    async fn find_by_request(&self, request_id: &str) -> Result<Option<ApprovedEntry>>;
}

#[async_trait]
pub trait VisitorPassStore: Send + Sync {
    async fn insert(&self, pass: &VisitorPass) -> Result<()>;
}

/// MongoDB duplicate-key error (code 11000) on a unique index
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == 11000,
        ErrorKind::Command(ce) => ce.code == 11000,
        _ => false,
    }
}

/// Run one store round trip under a bounded deadline. Expiry is an
/// upstream failure, retryable by the caller.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, op: &str, fut: F) -> Result<T>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(res) => res.map_err(SyncError::from),
        Err(_) => Err(SyncError::upstream(format!("{} timed out", op))),
    }
}

/// Insert variant of [`with_deadline`] that reports unique-index conflicts
/// instead of folding them into upstream errors.
pub(crate) async fn insert_with_deadline<F>(deadline: Duration, op: &str, fut: F) -> Result<InsertOutcome>
where
    F: IntoFuture<Output = mongodb::error::Result<mongodb::results::InsertOneResult>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(Ok(_)) => Ok(InsertOutcome::Inserted),
        Ok(Err(e)) if is_duplicate_key(&e) => Ok(InsertOutcome::Conflict),
        Ok(Err(e)) => Err(SyncError::from(e)),
        Err(_) => Err(SyncError::upstream(format!("{} timed out", op))),
    }
}
