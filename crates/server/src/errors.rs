use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use service::auth::AuthError;
use service::errors::ServiceError;

pub const UNAUTHORIZED_ACCESS: &str = "unauthorized access";
pub const FORBIDDEN_ACCESS: &str = "forbidden access";

/// Error payload shared by every failure: `{"error": true, "message": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: true, message: self.message };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        match e {
            // no status override: the error body is sent with the default 200
            AuthError::MissingHeader => Self::new(StatusCode::OK, UNAUTHORIZED_ACCESS),
            AuthError::InvalidToken(_) | AuthError::Expired => Self::new(StatusCode::FORBIDDEN, UNAUTHORIZED_ACCESS),
            AuthError::IdentityMismatch => Self::new(StatusCode::FORBIDDEN, FORBIDDEN_ACCESS),
            AuthError::Validation(msg) => {
                warn!(code, error = %msg, "rejected token request");
                Self::new(StatusCode::BAD_REQUEST, msg)
            }
            AuthError::TokenError(msg) => {
                error!(code, error = %msg, "token signing failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

/// Store-layer failures are not distinguished for clients: all map to 500.
impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        error!(code = e.code(), error = %e, "store operation failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}
