use std::sync::Arc;

use tracing::{info, instrument};

use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::booking::{BookingRecord, NewBooking, StatusUpdate};

use crate::errors::{parse_id, ServiceError};
use super::repository::BookingRepository;

/// Booking operations. No payload validation: records are stored as submitted.
/// Ownership of the listing is enforced by the caller with `auth::authorize_owner`.
pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Insert the payload verbatim; the store assigns the id unless the client sent `_id`.
    ///
    /// # Examples
    /// ```
    /// use service::booking::{BookingService, repository::mock::MockBookingRepository};
    /// use models::booking::NewBooking;
    /// use std::sync::Arc;
    /// let svc = BookingService::new(Arc::new(MockBookingRepository::default()));
    /// let mut fields = serde_json::Map::new();
    /// fields.insert("email".into(), "rider@example.com".into());
    /// let ack = tokio_test::block_on(svc.create(NewBooking(fields))).unwrap();
    /// let stored = tokio_test::block_on(svc.get(&ack.inserted_id)).unwrap().unwrap();
    /// assert_eq!(stored.email(), Some("rider@example.com"));
    /// ```
    #[instrument(skip(self, booking), fields(email = booking.email().unwrap_or_default()))]
    pub async fn create(&self, booking: NewBooking) -> Result<InsertAck, ServiceError> {
        let ack = self.repo.insert(booking).await?;
        info!(id = %ack.inserted_id, "booking_created");
        Ok(ack)
    }

    /// Records whose `email` equals the filter; every record when the filter is absent.
    #[instrument(skip(self))]
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<BookingRecord>, ServiceError> {
        self.repo.find(email).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<BookingRecord>, ServiceError> {
        let oid = parse_id(id)?;
        self.repo.find_by_id(oid).await
    }

    /// Set only `status`; all other fields are left as stored.
    #[instrument(skip(self, update))]
    pub async fn update_status(&self, id: &str, update: StatusUpdate) -> Result<UpdateAck, ServiceError> {
        let oid = parse_id(id)?;
        let ack = self.repo.update_status(oid, update.status).await?;
        info!(matched = ack.matched_count, modified = ack.modified_count, "booking_status_updated");
        Ok(ack)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteAck, ServiceError> {
        let oid = parse_id(id)?;
        let ack = self.repo.delete(oid).await?;
        info!(deleted = ack.deleted_count, "booking_deleted");
        Ok(ack)
    }
}
