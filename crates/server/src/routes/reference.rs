use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use models::{category, workshop_instructor};
use service::reference::domain::{CategoryInput, InstructorInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/admin/categories", tag = "reference", responses((status = 200, description = "Categories ordered by name")))]
pub async fn list_categories(State(state): State<ServerState>) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(state.reference.list_categories().await?))
}

#[utoipa::path(post, path = "/admin/categories", tag = "reference", request_body = crate::openapi::CategoryInputDoc, responses((status = 201, description = "Created"), (status = 422, description = "Invalid fields")))]
pub async fn create_category(
    State(state): State<ServerState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<category::Model>), JsonApiError> {
    let created = state.reference.create_category(input).await?;
    info!(id = %created.id, "created category");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/instructors", tag = "reference", responses((status = 200, description = "Instructors ordered by name")))]
pub async fn list_instructors(State(state): State<ServerState>) -> Result<Json<Vec<workshop_instructor::Model>>, JsonApiError> {
    Ok(Json(state.reference.list_instructors().await?))
}

#[utoipa::path(post, path = "/admin/instructors", tag = "reference", request_body = crate::openapi::InstructorInputDoc, responses((status = 201, description = "Created"), (status = 422, description = "Invalid fields")))]
pub async fn create_instructor(
    State(state): State<ServerState>,
    Json(input): Json<InstructorInput>,
) -> Result<(StatusCode, Json<workshop_instructor::Model>), JsonApiError> {
    let created = state.reference.create_instructor(input).await?;
    info!(id = %created.id, "created instructor");
    Ok((StatusCode::CREATED, Json(created)))
}
