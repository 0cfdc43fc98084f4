use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use service::catalog::domain::{BulkIds, FilterOptions, WorkshopDetail, WorkshopFilter, WorkshopInput, WorkshopRow};
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::metrics::{SOFT_DELETES_TOTAL, WORKSHOPS_CREATED_TOTAL};
use crate::state::ServerState;

#[utoipa::path(get, path = "/admin/workshops", tag = "workshops", params(crate::openapi::WorkshopListParams), responses((status = 200, description = "One page of workshop rows")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
    Query(filter): Query<WorkshopFilter>,
) -> Result<Json<Page<WorkshopRow>>, JsonApiError> {
    let rows = state.workshops.list(filter, page).await?;
    info!(count = rows.items.len(), total = rows.total, "list workshops");
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/admin/workshops/filters", tag = "workshops", responses((status = 200, description = "Category and instructor choices")))]
pub async fn filter_options(State(state): State<ServerState>) -> Result<Json<FilterOptions>, JsonApiError> {
    Ok(Json(state.workshops.filter_options().await?))
}

#[utoipa::path(post, path = "/admin/workshops", tag = "workshops", request_body = crate::openapi::WorkshopInputDoc, responses((status = 201, description = "Created"), (status = 422, description = "Invalid fields")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<WorkshopInput>,
) -> Result<(StatusCode, Json<WorkshopDetail>), JsonApiError> {
    let created = state.workshops.create(input).await?;
    WORKSHOPS_CREATED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/workshops/{id}", tag = "workshops", params(("id" = Uuid, Path, description = "Workshop id")), responses((status = 200, description = "Workshop with benefits, category and instructor"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<WorkshopDetail>, JsonApiError> {
    Ok(Json(state.workshops.get(id).await?))
}

#[utoipa::path(put, path = "/admin/workshops/{id}", tag = "workshops", params(("id" = Uuid, Path, description = "Workshop id")), request_body = crate::openapi::WorkshopInputDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not found"), (status = 422, description = "Invalid fields")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<WorkshopInput>,
) -> Result<Json<WorkshopDetail>, JsonApiError> {
    Ok(Json(state.workshops.update(id, input).await?))
}

#[utoipa::path(delete, path = "/admin/workshops/{id}", tag = "workshops", params(("id" = Uuid, Path, description = "Workshop id")), responses((status = 204, description = "Moved to trash"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.workshops.delete(id).await?;
    SOFT_DELETES_TOTAL.with_label_values(&["workshop"]).inc();
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/admin/workshops/bulk-delete", tag = "workshops", request_body = crate::openapi::BulkIdsDoc, responses((status = 200, description = "Number of workshops trashed")))]
pub async fn bulk_delete(State(state): State<ServerState>, Json(body): Json<BulkIds>) -> Result<Json<Value>, JsonApiError> {
    let n = state.workshops.bulk_delete(&body.ids).await?;
    SOFT_DELETES_TOTAL.with_label_values(&["workshop"]).inc_by(n);
    Ok(Json(json!({ "deleted": n })))
}

#[utoipa::path(post, path = "/admin/workshops/{id}/restore", tag = "workshops", params(("id" = Uuid, Path, description = "Workshop id")), responses((status = 204, description = "Restored"), (status = 404, description = "No trashed workshop with this id")))]
pub async fn restore(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.workshops.restore(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/admin/workshops/{id}/force", tag = "workshops", params(("id" = Uuid, Path, description = "Workshop id")), responses((status = 204, description = "Deleted permanently"), (status = 404, description = "Not found")))]
pub async fn force_delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.workshops.force_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
