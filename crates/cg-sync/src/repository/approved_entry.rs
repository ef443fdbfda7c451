//! Approved Entry Store (MongoDB)
//!
//! Read-only: approved entries are written by the Access System's own
//! approval workflow.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::domain::ApprovedEntry;
use crate::error::Result;
use crate::repository::{with_deadline, ApprovedEntryStore};

pub struct MongoApprovedEntryStore {
    collection: Collection<ApprovedEntry>,
    deadline: Duration,
}

impl MongoApprovedEntryStore {
    pub fn new(db: &Database, deadline: Duration) -> Self {
        Self {
            collection: db.collection("approved_entries"),
            deadline,
        }
    }
}

#[async_trait]
impl ApprovedEntryStore for MongoApprovedEntryStore {
    async fn find_by_request(&self, request_id: &str) -> Result<Option<ApprovedEntry>> {
        with_deadline(
            self.deadline,
            "approved entry lookup",
            self.collection.find_one(doc! { "requestId": request_id }),
        )
        .await
    }
}
