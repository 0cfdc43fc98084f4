pub mod bookings;
pub mod front;
pub mod reference;
pub mod uploads;
pub mod workshops;

use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::metrics::encode_metrics;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public endpoints plus the admin resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let upload_limit = state.max_upload_bytes;

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/front", get(front::front_page));

    let reference_routes = Router::new()
        .route("/admin/categories", get(reference::list_categories).post(reference::create_category))
        .route("/admin/instructors", get(reference::list_instructors).post(reference::create_instructor));

    let workshop_routes = Router::new()
        .route("/admin/workshops", get(workshops::list).post(workshops::create))
        .route("/admin/workshops/filters", get(workshops::filter_options))
        .route("/admin/workshops/bulk-delete", post(workshops::bulk_delete))
        .route(
            "/admin/workshops/:id",
            get(workshops::get).put(workshops::update).delete(workshops::delete),
        )
        .route("/admin/workshops/:id/restore", post(workshops::restore))
        .route("/admin/workshops/:id/force", delete(workshops::force_delete));

    let booking_routes = Router::new()
        .route("/admin/booking-transactions", get(bookings::list).post(bookings::create))
        .route("/admin/booking-transactions/form", get(bookings::blank_form))
        .route("/admin/booking-transactions/form/events", post(bookings::apply_event))
        .route("/admin/booking-transactions/form/steps/:step/validate", post(bookings::validate_step))
        .route("/admin/booking-transactions/bulk-delete", post(bookings::bulk_delete))
        .route(
            "/admin/booking-transactions/:id",
            get(bookings::get).put(bookings::update).delete(bookings::delete),
        )
        .route("/admin/booking-transactions/:id/form", get(bookings::edit_form))
        .route("/admin/booking-transactions/:id/restore", post(bookings::restore))
        .route("/admin/booking-transactions/:id/force", delete(bookings::force_delete));

    let upload_routes = Router::new()
        .route("/admin/uploads/:slot", put(uploads::put_image))
        .layer(DefaultBodyLimit::max(upload_limit));

    public
        .merge(reference_routes)
        .merge(workshop_routes)
        .merge(booking_routes)
        .merge(upload_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
