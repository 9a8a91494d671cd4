//! Document shapes for the `bike-club` database and the MongoDB connection bootstrap.
//!
//! Records are kept schema-flexible: only the identity (`_id`) is typed, everything
//! else travels as JSON fields exactly as stored.

pub mod errors;
pub mod db;
pub mod document;
pub mod ack;
pub mod catalog;
pub mod booking;

pub use document::Fields;

#[cfg(test)]
mod tests;
