//! Stand-in store used when no database client could be built at startup. The
//! server keeps answering; every store call fails with the startup error.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::booking::{BookingRecord, NewBooking};
use models::catalog::{ServiceRecord, ServiceSummary};

use crate::booking::BookingRepository;
use crate::catalog::CatalogRepository;
use crate::errors::ServiceError;

#[derive(Clone, Debug)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T, ServiceError> {
        Err(ServiceError::Db(format!("database unavailable: {}", self.reason)))
    }
}

#[async_trait]
impl CatalogRepository for UnavailableStore {
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> { self.fail() }

    async fn find_summary(&self, _id: ObjectId) -> Result<Option<ServiceSummary>, ServiceError> { self.fail() }
}

#[async_trait]
impl BookingRepository for UnavailableStore {
    async fn insert(&self, _booking: NewBooking) -> Result<InsertAck, ServiceError> { self.fail() }

    async fn find(&self, _email: Option<&str>) -> Result<Vec<BookingRecord>, ServiceError> { self.fail() }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<BookingRecord>, ServiceError> { self.fail() }

    async fn update_status(&self, _id: ObjectId, _status: Value) -> Result<UpdateAck, ServiceError> { self.fail() }

    async fn delete(&self, _id: ObjectId) -> Result<DeleteAck, ServiceError> { self.fail() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_reports_the_startup_error() {
        let store = UnavailableStore::new("srv lookup failed");
        let err = CatalogRepository::list(&store).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Db(msg) if msg.contains("srv lookup failed")));
        assert!(BookingRepository::find(&store, Some("a@example.com")).await.is_err());
        assert!(store.delete(ObjectId::new()).await.is_err());
    }
}
