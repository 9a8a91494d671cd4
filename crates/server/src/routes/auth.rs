use std::sync::Arc;

use axum::{extract::{Request, State}, http::header::AUTHORIZATION, middleware::Next, response::Response, Json};
use tracing::{info, warn};

use models::Fields;
use service::auth::{bearer_token, domain::IssuedToken, AuthError, TokenService};
use service::booking::{BookingRepository, BookingService};
use service::catalog::{CatalogRepository, CatalogService};

use crate::errors::JsonApiError;
use crate::routes::Access;

#[derive(Clone, Debug, Default)]
pub struct ServerAuthConfig {
    /// Require a bearer token on PATCH/DELETE /booking/:id.
    pub protect_booking_mutations: bool,
}

impl ServerAuthConfig {
    pub fn booking_mutation_access(&self) -> Access {
        if self.protect_booking_mutations { Access::Bearer } else { Access::Public }
    }
}

/// Shared, cheaply clonable handles injected into every handler
#[derive(Clone)]
pub struct ServerState {
    pub tokens: Arc<TokenService>,
    pub catalog: Arc<CatalogService<dyn CatalogRepository>>,
    pub bookings: Arc<BookingService<dyn BookingRepository>>,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn new(
        tokens: TokenService,
        catalog_repo: Arc<dyn CatalogRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        auth: ServerAuthConfig,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            catalog: Arc::new(CatalogService::new(catalog_repo)),
            bookings: Arc::new(BookingService::new(booking_repo)),
            auth,
        }
    }
}

/// Issue a bearer token for the posted identity payload.
#[utoipa::path(
    post, path = "/jwt", tag = "auth",
    request_body = crate::openapi::TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::TokenResponse),
        (status = 400, description = "Missing or invalid email")
    )
)]
pub async fn issue_token(
    State(state): State<ServerState>,
    Json(payload): Json<Fields>,
) -> Result<Json<IssuedToken>, JsonApiError> {
    let token = state.tokens.issue(payload)?;
    Ok(Json(IssuedToken { token }))
}

/// Bearer guard for routes marked `Access::Bearer`.
/// No header: error body with the default 200 status. Bad signature or expired: 403.
/// On success the decoded `AuthContext` is stored in the request extensions for the handler.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let Some(authz) = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        warn!(path = %path, "missing Authorization header");
        return Err(AuthError::MissingHeader.into());
    };
    let token = bearer_token(authz).to_string();

    match state.tokens.verify(&token) {
        Ok(ctx) => {
            info!(path = %path, email = ctx.email().unwrap_or_default(), "bearer token accepted");
            req.extensions_mut().insert(ctx);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, code = e.code(), err = %e, "token validation failed");
            Err(e.into())
        }
    }
}
