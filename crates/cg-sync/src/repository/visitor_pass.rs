//! Visitor Pass Store (MongoDB)

use std::time::Duration;

use async_trait::async_trait;
use mongodb::{Collection, Database};

use crate::domain::VisitorPass;
use crate::error::Result;
use crate::repository::{with_deadline, VisitorPassStore};

pub struct MongoVisitorPassStore {
    collection: Collection<VisitorPass>,
    deadline: Duration,
}

impl MongoVisitorPassStore {
    pub fn new(db: &Database, deadline: Duration) -> Self {
        Self {
            collection: db.collection("visitor_passes"),
            deadline,
        }
    }
}

#[async_trait]
impl VisitorPassStore for MongoVisitorPassStore {
    async fn insert(&self, pass: &VisitorPass) -> Result<()> {
        with_deadline(self.deadline, "visitor pass insert", self.collection.insert_one(pass)).await?;
        Ok(())
    }
}
