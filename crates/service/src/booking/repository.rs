use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};

use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::booking::{BookingRecord, NewBooking, COLLECTION, EMAIL_FIELD, STATUS_FIELD};
use models::document::{fields_to_document, value_to_bson};
use serde_json::Value;

use crate::errors::ServiceError;

/// Repository abstraction for the booking collection. Each call is one store operation.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: NewBooking) -> Result<InsertAck, ServiceError>;
    /// `None` means no filter at all.
    async fn find(&self, email: Option<&str>) -> Result<Vec<BookingRecord>, ServiceError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BookingRecord>, ServiceError>;
    /// `status` is written as given, any JSON type.
    async fn update_status(&self, id: ObjectId, status: Value) -> Result<UpdateAck, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError>;
}

/// MongoDB-backed repository implementation.
#[derive(Clone)]
pub struct MongoBookingRepository {
    pub collection: Collection<Document>,
}

impl MongoBookingRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection::<Document>(COLLECTION) }
    }
}

fn email_filter(email: Option<&str>) -> Document {
    match email {
        Some(e) => doc! { "email": e },
        None => Document::new(),
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<InsertAck, ServiceError> {
        let doc = fields_to_document(&booking.0)?;
        let res = self.collection.insert_one(doc, None).await?;
        Ok(InsertAck::from(res))
    }

    async fn find(&self, email: Option<&str>) -> Result<Vec<BookingRecord>, ServiceError> {
        let cursor = self.collection.find(email_filter(email), None).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(BookingRecord::from_document).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BookingRecord>, ServiceError> {
        let found = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(found.map(BookingRecord::from_document))
    }

    async fn update_status(&self, id: ObjectId, status: Value) -> Result<UpdateAck, ServiceError> {
        let status = value_to_bson(&status)?;
        let res = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status } }, None)
            .await?;
        Ok(UpdateAck::from(res))
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        let res = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(DeleteAck::from(res))
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use models::document::{id_to_string, ID_FIELD};
    use models::Fields;
    use mongodb::bson::Bson;

    /// Keys are kept as BSON so a client string `_id` never matches an ObjectId lookup,
    /// the same as in MongoDB.
    #[derive(Default)]
    pub struct MockBookingRepository {
        records: Mutex<Vec<(Bson, Fields)>>, // insertion order
        calls: AtomicUsize,
    }

    impl MockBookingRepository {
        /// Number of repository operations served so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }

        fn record(id: &Bson, fields: &Fields) -> BookingRecord {
            BookingRecord { id: id_to_string(id), fields: fields.clone() }
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn insert(&self, booking: NewBooking) -> Result<InsertAck, ServiceError> {
            self.touch();
            let mut fields = booking.0;
            let id = match fields.remove(ID_FIELD) {
                Some(v) => value_to_bson(&v)?,
                None => Bson::ObjectId(ObjectId::new()),
            };
            let mut records = self.records.lock().unwrap();
            if records.iter().any(|(rid, _)| *rid == id) {
                return Err(ServiceError::Db(format!("E11000 duplicate key error: _id {}", id_to_string(&id))));
            }
            records.push((id.clone(), fields));
            Ok(InsertAck::new(id_to_string(&id)))
        }

        async fn find(&self, email: Option<&str>) -> Result<Vec<BookingRecord>, ServiceError> {
            self.touch();
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|(_, f)| match email {
                    Some(e) => f.get(EMAIL_FIELD).and_then(Value::as_str) == Some(e),
                    None => true,
                })
                .map(|(id, f)| Self::record(id, f))
                .collect())
        }

        async fn find_by_id(&self, id: ObjectId) -> Result<Option<BookingRecord>, ServiceError> {
            self.touch();
            let key = Bson::ObjectId(id);
            let records = self.records.lock().unwrap();
            Ok(records.iter().find(|(rid, _)| *rid == key).map(|(rid, f)| Self::record(rid, f)))
        }

        async fn update_status(&self, id: ObjectId, status: Value) -> Result<UpdateAck, ServiceError> {
            self.touch();
            let key = Bson::ObjectId(id);
            let mut records = self.records.lock().unwrap();
            let Some((_, fields)) = records.iter_mut().find(|(rid, _)| *rid == key) else {
                return Ok(UpdateAck::new(0, 0));
            };
            // like MongoDB, writing the same value matches but does not modify
            let modified = fields.get(STATUS_FIELD) != Some(&status);
            fields.insert(STATUS_FIELD.to_string(), status);
            Ok(UpdateAck::new(1, u64::from(modified)))
        }

        async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
            self.touch();
            let key = Bson::ObjectId(id);
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|(rid, _)| *rid != key);
            Ok(DeleteAck::new((before - records.len()) as u64))
        }
    }
}
