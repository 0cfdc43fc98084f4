use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use service::booking::domain::{BookingDetail, BookingFilter, BookingRow};
use service::booking::{BookingForm, FormEvent, WizardStep};
use service::catalog::domain::BulkIds;
use service::errors::FieldErrors;
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::metrics::{BOOKINGS_CREATED_TOTAL, SOFT_DELETES_TOTAL};
use crate::state::ServerState;

/// Current form state plus the field change to apply.
#[derive(Debug, Deserialize)]
pub struct FormEventRequest {
    #[serde(default)]
    pub form: BookingForm,
    pub event: FormEvent,
}

#[derive(Debug, Serialize)]
pub struct StepValidation {
    pub step: WizardStep,
    pub valid: bool,
    pub errors: FieldErrors,
}

#[utoipa::path(get, path = "/admin/booking-transactions", tag = "bookings", params(crate::openapi::BookingListParams), responses((status = 200, description = "One page of booking rows")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Page<BookingRow>>, JsonApiError> {
    let rows = state.bookings.list(filter, page).await?;
    info!(count = rows.items.len(), total = rows.total, "list bookings");
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/admin/booking-transactions/form", tag = "bookings", responses((status = 200, description = "Blank form with a generated booking_trx_id")))]
pub async fn blank_form(State(state): State<ServerState>) -> Result<Json<BookingForm>, JsonApiError> {
    Ok(Json(state.bookings.blank_form().await?))
}

#[utoipa::path(post, path = "/admin/booking-transactions/form/events", tag = "bookings", request_body = crate::openapi::FormEventRequestDoc, responses((status = 200, description = "Form with derived fields recomputed")))]
pub async fn apply_event(
    State(state): State<ServerState>,
    Json(req): Json<FormEventRequest>,
) -> Result<Json<BookingForm>, JsonApiError> {
    Ok(Json(state.bookings.apply_event(req.form, req.event).await?))
}

#[utoipa::path(post, path = "/admin/booking-transactions/form/steps/{step}/validate", tag = "bookings", params(("step" = String, Path, description = "product-and-price, customer-information, payment-information or 1-3")), request_body = crate::openapi::BookingFormDoc, responses((status = 200, description = "Per-field messages for the step"), (status = 400, description = "Unknown step")))]
pub async fn validate_step(
    State(state): State<ServerState>,
    Path(step): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<Json<StepValidation>, JsonApiError> {
    let step: WizardStep = step.parse()?;
    let errors = state.bookings.validate_step(&form, step);
    Ok(Json(StepValidation { step, valid: errors.is_empty(), errors }))
}

#[utoipa::path(post, path = "/admin/booking-transactions", tag = "bookings", request_body = crate::openapi::BookingFormDoc, responses((status = 201, description = "Created"), (status = 409, description = "booking_trx_id already used"), (status = 422, description = "Invalid fields")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<BookingDetail>), JsonApiError> {
    let created = state.bookings.create(form).await?;
    BOOKINGS_CREATED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin/booking-transactions/{id}", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), responses((status = 200, description = "Booking with participants and workshop"), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<BookingDetail>, JsonApiError> {
    Ok(Json(state.bookings.get(id).await?))
}

#[utoipa::path(get, path = "/admin/booking-transactions/{id}/form", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), responses((status = 200, description = "Stored booking as a re-priced form"), (status = 404, description = "Not found")))]
pub async fn edit_form(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<BookingForm>, JsonApiError> {
    Ok(Json(state.bookings.edit_form(id).await?))
}

#[utoipa::path(put, path = "/admin/booking-transactions/{id}", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), request_body = crate::openapi::BookingFormDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not found"), (status = 422, description = "Invalid fields")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BookingForm>,
) -> Result<Json<BookingDetail>, JsonApiError> {
    Ok(Json(state.bookings.update(id, form).await?))
}

#[utoipa::path(delete, path = "/admin/booking-transactions/{id}", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), responses((status = 204, description = "Moved to trash"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.bookings.delete(id).await?;
    SOFT_DELETES_TOTAL.with_label_values(&["booking_transaction"]).inc();
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/admin/booking-transactions/bulk-delete", tag = "bookings", request_body = crate::openapi::BulkIdsDoc, responses((status = 200, description = "Number of bookings trashed")))]
pub async fn bulk_delete(State(state): State<ServerState>, Json(body): Json<BulkIds>) -> Result<Json<Value>, JsonApiError> {
    let n = state.bookings.bulk_delete(&body.ids).await?;
    SOFT_DELETES_TOTAL.with_label_values(&["booking_transaction"]).inc_by(n);
    Ok(Json(json!({ "deleted": n })))
}

#[utoipa::path(post, path = "/admin/booking-transactions/{id}/restore", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), responses((status = 204, description = "Restored"), (status = 404, description = "No trashed booking with this id")))]
pub async fn restore(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.bookings.restore(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/admin/booking-transactions/{id}/force", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), responses((status = 204, description = "Deleted permanently"), (status = 404, description = "Not found")))]
pub async fn force_delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.bookings.force_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
