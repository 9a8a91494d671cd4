/// BSON <-> JSON conversion tests
pub mod document_tests;

/// Record, projection and acknowledgment shape tests
pub mod record_tests;
