//! OpenAPI document served at `/api-docs/openapi.json`.
//!
//! Request payloads are described by the `*Doc` mirrors below; decimal
//! amounts travel as JSON strings.

use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CategoryInputDoc { pub name: String, pub icon: Option<String> }

#[derive(ToSchema)]
pub struct InstructorInputDoc { pub name: String, pub occupation: String, pub avatar: Option<String> }

#[derive(ToSchema)]
pub struct BenefitInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct WorkshopInputDoc {
    pub name: String,
    pub thumbnail: String,
    pub venue_thumbnail: String,
    pub bg_map: String,
    pub address: String,
    pub about: String,
    #[schema(example = "150000.00")]
    pub price: String,
    pub is_open: bool,
    pub has_started: bool,
    #[schema(example = "2024-09-01")]
    pub started_at: String,
    #[schema(example = "09:30:00")]
    pub time_at: String,
    pub category_id: Uuid,
    pub workshop_instructor_id: Uuid,
    pub benefits: Vec<BenefitInputDoc>,
}

#[derive(ToSchema)]
pub struct BulkIdsDoc { pub ids: Vec<Uuid> }

#[derive(ToSchema)]
pub struct ParticipantDoc { pub name: String, pub occupation: String, pub email: String }

#[derive(ToSchema)]
pub struct BookingFormDoc {
    pub workshop_id: Option<Uuid>,
    pub price: String,
    pub quantity: u32,
    pub total_amount: String,
    pub participants: Vec<ParticipantDoc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_bank_name: String,
    pub customer_bank_account: String,
    pub customer_bank_number: String,
    pub booking_trx_id: String,
    pub is_paid: Option<bool>,
    pub proof: Option<String>,
}

/// `{"type": "workshop_selected", "workshop_id": ...}`,
/// `{"type": "quantity_changed", "quantity": 2}` or `{"type": "hydrated"}`.
#[derive(ToSchema)]
pub struct FormEventDoc {
    #[schema(example = "quantity_changed")]
    pub r#type: String,
    pub workshop_id: Option<Uuid>,
    pub quantity: Option<u32>,
}

#[derive(ToSchema)]
pub struct FormEventRequestDoc { pub form: BookingFormDoc, pub event: FormEventDoc }

#[allow(dead_code)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkshopListParams {
    page: Option<u32>,
    per_page: Option<u32>,
    /// name contains, case-insensitive
    search: Option<String>,
    category_id: Option<Uuid>,
    /// category display name
    category: Option<String>,
    instructor_id: Option<Uuid>,
    /// instructor display name
    instructor: Option<String>,
    booking_trx_id: Option<String>,
    /// without (default), with or only
    trashed: Option<String>,
}

#[allow(dead_code)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListParams {
    page: Option<u32>,
    per_page: Option<u32>,
    /// customer name or booking_trx_id contains
    search: Option<String>,
    workshop_id: Option<Uuid>,
    /// without (default), with or only
    trashed: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::front::front_page,
        crate::routes::reference::list_categories,
        crate::routes::reference::create_category,
        crate::routes::reference::list_instructors,
        crate::routes::reference::create_instructor,
        crate::routes::workshops::list,
        crate::routes::workshops::filter_options,
        crate::routes::workshops::create,
        crate::routes::workshops::get,
        crate::routes::workshops::update,
        crate::routes::workshops::delete,
        crate::routes::workshops::bulk_delete,
        crate::routes::workshops::restore,
        crate::routes::workshops::force_delete,
        crate::routes::bookings::list,
        crate::routes::bookings::blank_form,
        crate::routes::bookings::apply_event,
        crate::routes::bookings::validate_step,
        crate::routes::bookings::create,
        crate::routes::bookings::get,
        crate::routes::bookings::edit_form,
        crate::routes::bookings::update,
        crate::routes::bookings::delete,
        crate::routes::bookings::bulk_delete,
        crate::routes::bookings::restore,
        crate::routes::bookings::force_delete,
        crate::routes::uploads::put_image,
    ),
    components(
        schemas(
            HealthResponse,
            CategoryInputDoc,
            InstructorInputDoc,
            BenefitInputDoc,
            WorkshopInputDoc,
            BulkIdsDoc,
            ParticipantDoc,
            BookingFormDoc,
            FormEventDoc,
            FormEventRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "front"),
        (name = "reference"),
        (name = "workshops"),
        (name = "bookings"),
        (name = "uploads")
    )
)]
pub struct ApiDoc;
