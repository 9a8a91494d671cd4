use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid object id: {0}")]
    InvalidId(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<mongodb::error::Error> for ModelError {
    fn from(e: mongodb::error::Error) -> Self { ModelError::Db(e.to_string()) }
}
