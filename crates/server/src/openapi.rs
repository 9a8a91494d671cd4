use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct TokenRequest {
    /// Identity claim; any further fields are embedded as extra claims.
    pub email: String,
}

#[derive(ToSchema)]
pub struct TokenResponse { pub token: String }

/// Free-form booking; stored as submitted, including a client `_id`.
#[derive(ToSchema)]
pub struct BookingDoc {
    pub email: String,
    pub status: Option<String>,
}

/// `status` is stored as sent; any JSON type is accepted.
#[derive(ToSchema)]
pub struct StatusUpdateDoc {
    #[schema(value_type = Object)]
    pub status: serde_json::Value,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct InsertAckDoc { pub acknowledged: bool, pub inserted_id: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateAckDoc {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DeleteAckDoc { pub acknowledged: bool, pub deleted_count: u64 }

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::auth::issue_token,
        crate::routes::catalog::list,
        crate::routes::catalog::get,
        crate::routes::booking::create,
        crate::routes::booking::list,
        crate::routes::booking::update_status,
        crate::routes::booking::delete,
    ),
    components(
        schemas(
            HealthResponse,
            TokenRequest,
            TokenResponse,
            BookingDoc,
            StatusUpdateDoc,
            InsertAckDoc,
            UpdateAckDoc,
            DeleteAckDoc,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "booking")
    )
)]
pub struct ApiDoc;
