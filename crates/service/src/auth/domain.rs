use serde::{Deserialize, Serialize};

use models::Fields;

/// Signed token payload: the email identity, any extra client claims, and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Fields,
}

/// Decoded identity of a verified request, scoped to that request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub email: Option<String>,
    pub issued_at: i64,
    pub expires_at: i64,
    pub extra: Fields,
}

impl AuthContext {
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }
}

impl From<Claims> for AuthContext {
    fn from(c: Claims) -> Self {
        Self { email: c.email, issued_at: c.iat, expires_at: c.exp, extra: c.extra }
    }
}

/// Response of the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}
