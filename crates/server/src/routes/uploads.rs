use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use service::storage::ImageSlot;

use crate::errors::JsonApiError;
use crate::metrics::UPLOADS_TOTAL;
use crate::state::ServerState;

/// Raw image body; the reference to store on the record comes back as `path`.
#[utoipa::path(put, path = "/admin/uploads/{slot}", tag = "uploads", params(("slot" = String, Path, description = "thumbnails, venue_thumbnails, bg_maps or proofs")), request_body(content = Vec<u8>, content_type = "image/*"), responses((status = 201, description = "Stored"), (status = 400, description = "Not an image or unknown slot")))]
pub async fn put_image(
    State(state): State<ServerState>,
    Path(slot): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let slot: ImageSlot = slot.parse()?;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| JsonApiError::bad_request("Content-Type header is required"))?;
    let path = state.files.put(slot, content_type, &body).await?;
    UPLOADS_TOTAL.with_label_values(&[slot.dir()]).inc();
    info!(%path, "uploaded image");
    Ok((StatusCode::CREATED, Json(json!({ "path": path }))))
}
