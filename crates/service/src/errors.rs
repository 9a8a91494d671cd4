use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidId(_) => 2001,
            ServiceError::Db(_) => 2100,
            ServiceError::Model(_) => 2200,
        }
    }
}

impl From<mongodb::error::Error> for ServiceError {
    fn from(e: mongodb::error::Error) -> Self { ServiceError::Db(e.to_string()) }
}

/// Turn a path id into an ObjectId; malformed ids never reach the store.
pub fn parse_id(raw: &str) -> Result<ObjectId, ServiceError> {
    models::document::parse_object_id(raw).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}
