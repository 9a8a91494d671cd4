use axum::{extract::{Path, State}, Json};
use tracing::info;

use models::catalog::{ServiceRecord, ServiceSummary};

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/services", tag = "catalog",
    responses(
        (status = 200, description = "All catalog records"),
        (status = 500, description = "Store Error")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    let list = state.catalog.list().await?;
    info!(count = list.len(), "list services");
    Ok(Json(list))
}

/// `null` body when nothing matches; there is no 404 here.
#[utoipa::path(
    get, path = "/services/{id}", tag = "catalog",
    params(("id" = String, Path, description = "Service ObjectId (24 hex)")),
    responses(
        (status = 200, description = "title, price, service_id, img; or null"),
        (status = 500, description = "Store Error or malformed id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ServiceSummary>>, JsonApiError> {
    Ok(Json(state.catalog.get_summary(&id).await?))
}
