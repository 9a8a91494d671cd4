use axum::{extract::{Path, Query, State}, Extension, Json};
use serde::Deserialize;
use tracing::{info, warn};

use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::booking::{BookingRecord, NewBooking, StatusUpdate};
use service::auth::{authorize_owner, AuthContext};

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Must equal the email carried by the bearer token.
    pub email: Option<String>,
}

#[utoipa::path(
    post, path = "/booking", tag = "booking",
    request_body = crate::openapi::BookingDoc,
    responses(
        (status = 200, description = "Insert acknowledgment", body = crate::openapi::InsertAckDoc),
        (status = 500, description = "Store Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(booking): Json<NewBooking>,
) -> Result<Json<InsertAck>, JsonApiError> {
    Ok(Json(state.bookings.create(booking).await?))
}

/// Only the token owner's bookings. Without `email` the token identity must be
/// absent too, which tokens issued here never are.
#[utoipa::path(
    get, path = "/booking", tag = "booking",
    params(ListQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Bookings of the caller, or an error body when the Authorization header is missing"),
        (status = 403, description = "Invalid token or identity mismatch")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<BookingRecord>>, JsonApiError> {
    if let Err(e) = authorize_owner(&ctx, q.email.as_deref()) {
        warn!(token_email = ?ctx.email(), requested = ?q.email, "booking list identity mismatch");
        return Err(e.into());
    }
    let list = state.bookings.list(q.email.as_deref()).await?;
    info!(count = list.len(), "list bookings");
    Ok(Json(list))
}

#[utoipa::path(
    patch, path = "/booking/{id}", tag = "booking",
    params(("id" = String, Path, description = "Booking ObjectId (24 hex)")),
    request_body = crate::openapi::StatusUpdateDoc,
    responses(
        (status = 200, description = "Update acknowledgment", body = crate::openapi::UpdateAckDoc),
        (status = 500, description = "Store Error or malformed id")
    )
)]
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<UpdateAck>, JsonApiError> {
    Ok(Json(state.bookings.update_status(&id, update).await?))
}

#[utoipa::path(
    delete, path = "/booking/{id}", tag = "booking",
    params(("id" = String, Path, description = "Booking ObjectId (24 hex)")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = crate::openapi::DeleteAckDoc),
        (status = 500, description = "Store Error or malformed id")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, JsonApiError> {
    Ok(Json(state.bookings.delete(&id).await?))
}
