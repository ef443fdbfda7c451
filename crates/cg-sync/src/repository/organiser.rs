//! Organiser Store (MongoDB)

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::domain::OrganiserIdentity;
use crate::error::Result;
use crate::repository::{insert_with_deadline, with_deadline, InsertOutcome, OrganiserStore};

pub struct MongoOrganiserStore {
    collection: Collection<OrganiserIdentity>,
    deadline: Duration,
}

impl MongoOrganiserStore {
    pub fn new(db: &Database, deadline: Duration) -> Self {
        Self {
            collection: db.collection("organisers"),
            deadline,
        }
    }

    /// Unique index on email: closes the concurrent first-call race
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        with_deadline(self.deadline, "organiser index", self.collection.create_index(index)).await?;
        Ok(())
    }
}

#[async_trait]
impl OrganiserStore for MongoOrganiserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<OrganiserIdentity>> {
        with_deadline(
            self.deadline,
            "organiser lookup",
            self.collection.find_one(doc! { "email": email }),
        )
        .await
    }

    async fn insert(&self, organiser: &OrganiserIdentity) -> Result<InsertOutcome> {
        insert_with_deadline(
            self.deadline,
            "organiser insert",
            self.collection.insert_one(organiser),
        )
        .await
    }
}
