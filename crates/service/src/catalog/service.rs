use std::sync::Arc;

use tracing::{debug, instrument};

use models::catalog::{ServiceRecord, ServiceSummary};

use crate::errors::{parse_id, ServiceError};
use super::repository::CatalogRepository;

/// Catalog reads; results are passed through from the store unchanged.
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        let list = self.repo.list().await?;
        debug!(count = list.len(), "catalog_listed");
        Ok(list)
    }

    /// Projected lookup. `Ok(None)` when no record has this id.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{CatalogService, repository::mock::MockCatalogRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockCatalogRepository::default());
    /// let mut fields = serde_json::Map::new();
    /// fields.insert("title".into(), "Road bike".into());
    /// fields.insert("description".into(), "carbon frame".into());
    /// let id = repo.insert(fields);
    /// let svc = CatalogService::new(repo);
    /// let summary = tokio_test::block_on(svc.get_summary(&id.to_hex())).unwrap().unwrap();
    /// assert_eq!(summary.title, Some("Road bike".into()));
    /// ```
    #[instrument(skip(self))]
    pub async fn get_summary(&self, id: &str) -> Result<Option<ServiceSummary>, ServiceError> {
        let oid = parse_id(id)?;
        self.repo.find_summary(oid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_catalog, service_fields};

    #[tokio::test]
    async fn list_returns_every_record_unfiltered() {
        let (repo, _ids) = sample_catalog();
        let svc = CatalogService::new(repo);
        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title(), Some("Mountain bike"));
        assert!(all[0].fields.contains_key("description"));
    }

    #[tokio::test]
    async fn summary_strips_extra_fields() {
        let (repo, ids) = sample_catalog();
        let svc = CatalogService::new(repo);
        let summary = svc.get_summary(&ids[0].to_hex()).await.unwrap().unwrap();
        let v = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(summary, ServiceSummary::from_fields(&service_fields("Mountain bike", 30, "01")));
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_error() {
        let (repo, _ids) = sample_catalog();
        let svc = CatalogService::new(repo);
        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(svc.get_summary(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_before_the_store() {
        let (repo, _ids) = sample_catalog();
        let svc = CatalogService::new(repo);
        assert!(matches!(svc.get_summary("xyz").await, Err(ServiceError::InvalidId(_))));
    }
}
