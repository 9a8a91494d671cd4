use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::Value;
use tracing::{debug, info, instrument};

use models::Fields;

use super::domain::{AuthContext, Claims};
use super::errors::AuthError;

/// Issues and verifies HS256 bearer tokens against one shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Sign `payload` with `exp = now + ttl`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::TokenService;
    /// let svc = TokenService::new("secret", 72);
    /// let mut payload = serde_json::Map::new();
    /// payload.insert("email".into(), "rider@example.com".into());
    /// let token = svc.issue(payload).unwrap();
    /// let ctx = svc.verify(&token).unwrap();
    /// assert_eq!(ctx.email(), Some("rider@example.com"));
    /// ```
    pub fn issue(&self, payload: Fields) -> Result<String, AuthError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign `payload` as if issued at `now`. The payload must carry a string `email`
    /// containing '@'; other fields ride along as extra claims and any client
    /// `iat`/`exp` are replaced.
    #[instrument(skip(self, payload), fields(email = tracing::field::Empty))]
    pub fn issue_at(&self, mut payload: Fields, now: DateTime<Utc>) -> Result<String, AuthError> {
        let email = match payload.remove("email") {
            Some(Value::String(e)) if e.contains('@') => e,
            Some(_) => return Err(AuthError::Validation("email must be an email address".into())),
            None => return Err(AuthError::Validation("email is required".into())),
        };
        tracing::Span::current().record("email", email.as_str());
        payload.remove("iat");
        payload.remove("exp");

        let claims = Claims {
            email: Some(email),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            extra: payload,
        };
        let token = encode(&JwtHeader::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(exp = claims.exp, "token_issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<AuthContext, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature and expiry as seen at `now`. A token is expired from the
    /// second its `exp` is reached.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthContext, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked below against the supplied clock, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        // extra client claims may include `aud`; audience is not part of this scheme
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(err = %e, "token_rejected");
            AuthError::InvalidToken(e.to_string())
        })?;
        if now.timestamp() >= data.claims.exp {
            debug!(exp = data.claims.exp, "token_expired");
            return Err(AuthError::Expired);
        }
        Ok(AuthContext::from(data.claims))
    }
}

/// Token part of an `Authorization` value: the second whitespace-separated segment.
/// The scheme is not checked; a value without a second segment yields "".
pub fn bearer_token(header_value: &str) -> &str {
    header_value.split_whitespace().nth(1).unwrap_or("")
}

/// A caller may only act on the identity its token carries. Both sides absent
/// counts as a match.
pub fn authorize_owner(ctx: &AuthContext, requested_email: Option<&str>) -> Result<(), AuthError> {
    if ctx.email() != requested_email {
        return Err(AuthError::IdentityMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Fields {
        v.as_object().cloned().unwrap()
    }

    fn svc() -> TokenService { TokenService::new("test-secret", 72) }

    #[test]
    fn issued_token_verifies_and_carries_extra_claims() {
        let s = svc();
        let token = s.issue(payload(json!({ "email": "a@example.com", "name": "Ann" }))).unwrap();
        let ctx = s.verify(&token).unwrap();
        assert_eq!(ctx.email(), Some("a@example.com"));
        assert_eq!(ctx.extra.get("name"), Some(&json!("Ann")));
        assert_eq!(ctx.expires_at - ctx.issued_at, 72 * 3600);
    }

    #[test]
    fn token_valid_until_ttl_elapses() {
        let s = svc();
        let issued = Utc::now();
        let token = s.issue_at(payload(json!({ "email": "a@example.com" })), issued).unwrap();

        assert!(s.verify_at(&token, issued).is_ok());
        assert!(s.verify_at(&token, issued + Duration::hours(71)).is_ok());
        assert!(s.verify_at(&token, issued + Duration::hours(72) - Duration::seconds(1)).is_ok());
        assert_eq!(s.verify_at(&token, issued + Duration::hours(72)), Err(AuthError::Expired));
        assert_eq!(s.verify_at(&token, issued + Duration::days(30)), Err(AuthError::Expired));
    }

    #[test]
    fn client_supplied_exp_is_ignored() {
        let s = svc();
        let issued = Utc::now();
        let far_future = (issued + Duration::days(3650)).timestamp();
        let token = s
            .issue_at(payload(json!({ "email": "a@example.com", "exp": far_future, "iat": 0 })), issued)
            .unwrap();
        let ctx = s.verify_at(&token, issued).unwrap();
        assert_eq!(ctx.expires_at, (issued + Duration::hours(72)).timestamp());
        assert!(!ctx.extra.contains_key("exp"));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = svc().issue(payload(json!({ "email": "a@example.com" }))).unwrap();
        let other = TokenService::new("another-secret", 72);
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn malformed_token_is_invalid() {
        assert!(matches!(svc().verify("not.a.jwt"), Err(AuthError::InvalidToken(_))));
        assert!(matches!(svc().verify(""), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let s = svc();
        let token = s.issue(payload(json!({ "email": "a@example.com" }))).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = s.issue(payload(json!({ "email": "b@example.com" }))).unwrap();
        let forged_claims = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_claims;
        assert!(matches!(s.verify(&parts.join(".")), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn issue_requires_email_identity() {
        let s = svc();
        assert!(matches!(s.issue(payload(json!({ "name": "x" }))), Err(AuthError::Validation(_))));
        assert!(matches!(s.issue(payload(json!({ "email": "no-at-sign" }))), Err(AuthError::Validation(_))));
        assert!(matches!(s.issue(payload(json!({ "email": 5 }))), Err(AuthError::Validation(_))));
    }

    #[test]
    fn bearer_token_takes_second_segment() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(bearer_token("Token   abc"), "abc");
        assert_eq!(bearer_token("Bearer"), "");
        assert_eq!(bearer_token(""), "");
    }

    #[test]
    fn owner_check_compares_identities() {
        let ctx = AuthContext { email: Some("a@example.com".into()), issued_at: 0, expires_at: 1, extra: Fields::new() };
        assert!(authorize_owner(&ctx, Some("a@example.com")).is_ok());
        assert_eq!(authorize_owner(&ctx, Some("b@example.com")), Err(AuthError::IdentityMismatch));
        assert_eq!(authorize_owner(&ctx, None), Err(AuthError::IdentityMismatch));

        let anonymous = AuthContext { email: None, ..ctx };
        assert!(authorize_owner(&anonymous, None).is_ok());
        assert_eq!(authorize_owner(&anonymous, Some("a@example.com")), Err(AuthError::IdentityMismatch));
    }
}
