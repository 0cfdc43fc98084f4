use axum::{extract::State, Json};

use service::front::FrontPageData;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/front", tag = "front", responses((status = 200, description = "newWorkshops and categories for the landing page")))]
pub async fn front_page(State(state): State<ServerState>) -> Result<Json<FrontPageData>, JsonApiError> {
    Ok(Json(state.front.get_front_page_data().await?))
}
