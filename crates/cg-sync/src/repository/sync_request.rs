//! Sync Request Store (MongoDB)

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::domain::{SyncRequest, SyncRequestDetails};
use crate::error::{Result, SyncError};
use crate::repository::{insert_with_deadline, with_deadline, InsertOutcome, SyncRequestStore};

pub struct MongoSyncRequestStore {
    collection: Collection<SyncRequest>,
    deadline: Duration,
}

impl MongoSyncRequestStore {
    pub fn new(db: &Database, deadline: Duration) -> Self {
        Self {
            collection: db.collection("sync_requests"),
            deadline,
        }
    }

    /// Unique index on the correlation key: at most one request per pushed
    /// event or fest, enforced at the store layer
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "correlationKey": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        with_deadline(self.deadline, "sync request index", self.collection.create_index(index)).await?;
        Ok(())
    }
}

#[async_trait]
impl SyncRequestStore for MongoSyncRequestStore {
    async fn find_by_key(&self, correlation_key: &str) -> Result<Option<SyncRequest>> {
        with_deadline(
            self.deadline,
            "sync request lookup",
            self.collection.find_one(doc! { "correlationKey": correlation_key }),
        )
        .await
    }

    async fn insert(&self, request: &SyncRequest) -> Result<InsertOutcome> {
        insert_with_deadline(
            self.deadline,
            "sync request insert",
            self.collection.insert_one(request),
        )
        .await
    }

    async fn update_details(
        &self,
        correlation_key: &str,
        details: &SyncRequestDetails,
    ) -> Result<Option<SyncRequest>> {
        let set = bson::to_document(details)
            .map_err(|e| SyncError::upstream(format!("serialize request details: {}", e)))?;

        with_deadline(
            self.deadline,
            "sync request update",
            self.collection
                .find_one_and_update(doc! { "correlationKey": correlation_key }, doc! { "$set": set })
                .return_document(ReturnDocument::After),
        )
        .await
    }
}
