//! Service layer for the bike-club backend.
//! - Token issuance/verification and the ownership rule live in `auth`.
//! - `catalog` and `booking` pair a repository trait (MongoDB + in-memory mock)
//!   with a thin service that parses ids and logs.
//! - `unavailable` stands in for both stores when no database client could be built.

pub mod errors;
pub mod auth;
pub mod catalog;
pub mod booking;
pub mod unavailable;
#[cfg(test)]
pub mod test_support;
