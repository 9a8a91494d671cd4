use thiserror::Error;

/// Failures of token issuance, verification and ownership checks
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token expired")]
    Expired,
    #[error("identity mismatch")]
    IdentityMismatch,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingHeader => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::Expired => 1003,
            AuthError::IdentityMismatch => 1004,
            AuthError::Validation(_) => 1005,
            AuthError::TokenError(_) => 1102,
        }
    }
}
