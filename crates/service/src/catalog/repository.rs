use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOneOptions,
    Collection, Database,
};

use models::catalog::{ServiceRecord, ServiceSummary, COLLECTION};

use crate::errors::ServiceError;

/// Repository abstraction for the catalog collection.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError>;
    async fn find_summary(&self, id: ObjectId) -> Result<Option<ServiceSummary>, ServiceError>;
}

/// MongoDB-backed repository implementation.
#[derive(Clone)]
pub struct MongoCatalogRepository {
    pub collection: Collection<Document>,
}

impl MongoCatalogRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection::<Document>(COLLECTION) }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        let cursor = self.collection.find(None, None).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(ServiceRecord::from_document).collect())
    }

    async fn find_summary(&self, id: ObjectId) -> Result<Option<ServiceSummary>, ServiceError> {
        let options = FindOneOptions::builder().projection(ServiceSummary::projection()).build();
        let found = self.collection.find_one(doc! { "_id": id }, options).await?;
        Ok(found.map(ServiceSummary::from_document))
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use models::Fields;

    #[derive(Default)]
    pub struct MockCatalogRepository {
        records: Mutex<Vec<(ObjectId, Fields)>>, // insertion order
    }

    impl MockCatalogRepository {
        /// Seed a record and return its assigned id.
        pub fn insert(&self, fields: Fields) -> ObjectId {
            let id = ObjectId::new();
            self.records.lock().unwrap().push((id, fields));
            id
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .map(|(id, fields)| ServiceRecord { id: id.to_hex(), fields: fields.clone() })
                .collect())
        }

        async fn find_summary(&self, id: ObjectId) -> Result<Option<ServiceSummary>, ServiceError> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .find(|(rid, _)| *rid == id)
                .map(|(_, fields)| ServiceSummary::from_fields(fields)))
        }
    }
}
