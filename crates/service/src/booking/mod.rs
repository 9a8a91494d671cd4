//! Booking records: create, list by owner, status update, delete.

pub mod repository;
pub mod service;

pub use repository::{BookingRepository, MongoBookingRepository};
pub use service::BookingService;
