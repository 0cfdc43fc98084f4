use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::workshop;

use super::domain::{BookingDetail, BookingFilter, BookingRow, BookingSubmission};
use super::form::{BookingForm, FormEvent, WizardStep};
use super::repository::BookingRepository;
use crate::catalog::repository::WorkshopRepository;
use crate::errors::{FieldErrors, ServiceError};
use crate::pagination::{Page, Pagination};
use crate::trashed::Trashed;

const TRX_ID_ATTEMPTS: usize = 32;

/// Booking administration and the server side of the booking wizard.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    workshops: Arc<dyn WorkshopRepository>,
    trx_prefix: String,
}

fn invalid(field: &str, message: &str) -> ServiceError {
    let mut errors = FieldErrors::default();
    errors.add(field, message);
    ServiceError::Invalid(errors)
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>, workshops: Arc<dyn WorkshopRepository>, trx_prefix: impl Into<String>) -> Self {
        Self { bookings, workshops, trx_prefix: trx_prefix.into() }
    }

    /// `<prefix><4 digits>` not used by any stored booking, trashed ones included.
    pub async fn generate_trx_id(&self) -> Result<String, ServiceError> {
        for _ in 0..TRX_ID_ATTEMPTS {
            let n: u16 = rand::thread_rng().gen_range(0..10_000);
            let candidate = format!("{}{:04}", self.trx_prefix, n);
            if self.bookings.find_booking_by_trx_id(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            debug!(%candidate, "booking_trx_id taken, retrying");
        }
        Err(ServiceError::Conflict("could not generate a free booking transaction id".into()))
    }

    pub async fn blank_form(&self) -> Result<BookingForm, ServiceError> {
        Ok(BookingForm::blank(self.generate_trx_id().await?))
    }

    /// Unit price of a selectable workshop; trashed or unknown ids have none.
    async fn workshop_price(&self, id: Option<Uuid>) -> Result<Option<Decimal>, ServiceError> {
        let Some(id) = id else { return Ok(None) };
        Ok(self.workshops.find_workshop(id, Trashed::Without).await?.map(|w| w.price))
    }

    /// Every event re-resolves the unit price; the posted `price` is ignored.
    pub async fn apply_event(&self, mut form: BookingForm, event: FormEvent) -> Result<BookingForm, ServiceError> {
        let workshop_id = match &event {
            FormEvent::WorkshopSelected { workshop_id } => *workshop_id,
            FormEvent::QuantityChanged { .. } | FormEvent::Hydrated => form.workshop_id,
        };
        let price = self.workshop_price(workshop_id).await?;
        form.apply(event, price)?;
        Ok(form)
    }

    /// Stored booking loaded into the form and re-priced.
    pub async fn edit_form(&self, id: Uuid) -> Result<BookingForm, ServiceError> {
        let booking = self
            .bookings
            .find_booking(id, Trashed::With)
            .await?
            .ok_or_else(|| ServiceError::not_found("booking transaction"))?;
        let participants = self.bookings.list_participants_for_booking(id).await?;
        let form = BookingForm::from_record(&booking, &participants);
        self.apply_event(form, FormEvent::Hydrated).await
    }

    pub fn validate_step(&self, form: &BookingForm, step: WizardStep) -> FieldErrors {
        form.validate_step(step)
    }

    /// Workshop a submission may be booked on: live, or the one the booking already had.
    async fn bookable_workshop(&self, submission: &BookingSubmission, current: Option<Uuid>) -> Result<workshop::Model, ServiceError> {
        let scope = if current == Some(submission.workshop_id) { Trashed::With } else { Trashed::Without };
        self.workshops
            .find_workshop(submission.workshop_id, scope)
            .await?
            .ok_or_else(|| invalid("workshop_id", "selected workshop does not exist"))
    }

    async fn ensure_trx_id_free(&self, trx_id: &str, own: Option<Uuid>) -> Result<(), ServiceError> {
        match self.bookings.find_booking_by_trx_id(trx_id).await? {
            Some(other) if Some(other.id) != own => {
                Err(ServiceError::Conflict(format!("booking_trx_id '{}' is already used", trx_id.trim())))
            }
            _ => Ok(()),
        }
    }

    #[instrument(skip(self, form), fields(booking_trx_id = %form.booking_trx_id))]
    pub async fn create(&self, form: BookingForm) -> Result<BookingDetail, ServiceError> {
        let submission = form.into_submission()?;
        let workshop = self.bookable_workshop(&submission, None).await?;
        self.ensure_trx_id_free(&submission.booking_trx_id, None).await?;
        let (fields, participants) = submission.into_fields(workshop.price)?;
        let created = self.bookings.create_booking(fields, participants).await?;
        info!(id = %created.id, workshop_id = %created.workshop_id, total = %created.total_amount, "booking_created");
        self.get(created.id).await
    }

    #[instrument(skip(self, form), fields(booking_trx_id = %form.booking_trx_id))]
    pub async fn update(&self, id: Uuid, form: BookingForm) -> Result<BookingDetail, ServiceError> {
        let existing = self
            .bookings
            .find_booking(id, Trashed::With)
            .await?
            .ok_or_else(|| ServiceError::not_found("booking transaction"))?;
        let submission = form.into_submission()?;
        let workshop = self.bookable_workshop(&submission, Some(existing.workshop_id)).await?;
        self.ensure_trx_id_free(&submission.booking_trx_id, Some(id)).await?;
        let (fields, participants) = submission.into_fields(workshop.price)?;
        let updated = self.bookings.update_booking(id, fields, participants).await?;
        info!(id = %updated.id, total = %updated.total_amount, "booking_updated");
        self.get(id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<BookingDetail, ServiceError> {
        let booking = self
            .bookings
            .find_booking(id, Trashed::With)
            .await?
            .ok_or_else(|| ServiceError::not_found("booking transaction"))?;
        let participants = self.bookings.list_participants_for_booking(id).await?;
        let workshop = self.workshops.find_workshop(booking.workshop_id, Trashed::With).await?;
        Ok(BookingDetail { booking, participants, workshop })
    }

    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: BookingFilter, page: Pagination) -> Result<Page<BookingRow>, ServiceError> {
        self.bookings.list_bookings(&filter, page).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.bookings.soft_delete_bookings(&[id]).await? == 0 {
            return Err(ServiceError::not_found("booking transaction"));
        }
        info!(%id, "booking_soft_deleted");
        Ok(())
    }

    #[instrument(skip(self, ids), fields(selected = ids.len()))]
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        let n = self.bookings.soft_delete_bookings(ids).await?;
        info!(deleted = n, "bookings_bulk_soft_deleted");
        Ok(n)
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.bookings.restore_booking(id).await? {
            return Err(ServiceError::not_found("trashed booking transaction"));
        }
        info!(%id, "booking_restored");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn force_delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.bookings.force_delete_booking(id).await? {
            return Err(ServiceError::not_found("booking transaction"));
        }
        info!(%id, "booking_force_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::domain::ParticipantInput;
    use crate::mock::{fixtures, InMemoryStore};
    use rust_decimal_macros::dec;

    fn service(store: &Arc<InMemoryStore>) -> BookingService {
        BookingService::new(store.clone(), store.clone(), "WSP")
    }

    async fn filled_form(svc: &BookingService, workshop_id: Uuid, quantity: u32) -> BookingForm {
        let form = svc.blank_form().await.unwrap();
        let form = svc.apply_event(form, FormEvent::WorkshopSelected { workshop_id: Some(workshop_id) }).await.unwrap();
        let mut form = svc.apply_event(form, FormEvent::QuantityChanged { quantity }).await.unwrap();
        for (i, p) in form.participants.iter_mut().enumerate() {
            *p = ParticipantInput { name: format!("P{i}"), occupation: "Engineer".into(), email: format!("p{i}@example.com") };
        }
        form.name = "Customer".into();
        form.email = "c@example.com".into();
        form.phone = "0812".into();
        form.customer_bank_name = "BCA".into();
        form.customer_bank_account = "Customer".into();
        form.customer_bank_number = "001".into();
        form.is_paid = Some(true);
        form.proof = Some("proofs/x.png".into());
        form
    }

    #[tokio::test]
    async fn blank_form_gets_prefixed_trx_id() {
        let store = Arc::new(InMemoryStore::default());
        let form = service(&store).blank_form().await.unwrap();
        assert!(form.booking_trx_id.starts_with("WSP"));
        assert_eq!(form.booking_trx_id.len(), 7);
        assert!(form.booking_trx_id[3..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(form.total_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn create_prices_from_workshop_and_stores_roster() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(150000)).await;
        let svc = service(&store);
        let mut form = filled_form(&svc, w.id, 2).await;
        form.total_amount = dec!(1);
        form.price = dec!(1);

        let detail = svc.create(form).await.unwrap();
        assert_eq!(detail.booking.price, dec!(150000));
        assert_eq!(detail.booking.total_amount, dec!(333000.00));
        assert_eq!(detail.participants.len(), 2);
        assert_eq!(detail.participants[1].name, "P1");
        assert_eq!(detail.workshop.unwrap().id, w.id);
    }

    #[tokio::test]
    async fn unknown_workshop_on_form_prices_zero() {
        let store = Arc::new(InMemoryStore::default());
        let svc = service(&store);
        let form = svc.blank_form().await.unwrap();
        let form = svc.apply_event(form, FormEvent::QuantityChanged { quantity: 2 }).await.unwrap();
        let form = svc.apply_event(form, FormEvent::WorkshopSelected { workshop_id: Some(Uuid::new_v4()) }).await.unwrap();
        assert_eq!(form.price, Decimal::ZERO);
        assert_eq!(form.total_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn huge_quantity_event_is_a_field_error() {
        let store = Arc::new(InMemoryStore::default());
        let svc = service(&store);
        let form = svc.blank_form().await.unwrap();
        match svc.apply_event(form, FormEvent::QuantityChanged { quantity: u32::MAX }).await {
            Err(ServiceError::Invalid(fields)) => assert!(fields.contains("quantity")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn posted_price_is_replaced_by_workshop_price() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(150000)).await;
        let svc = service(&store);
        let mut form = svc.blank_form().await.unwrap();
        form.workshop_id = Some(w.id);
        form.price = Decimal::MAX;
        let form = svc.apply_event(form, FormEvent::QuantityChanged { quantity: 2 }).await.unwrap();
        assert_eq!(form.price, dec!(150000));
        assert_eq!(form.total_amount, dec!(333000.00));
    }

    #[tokio::test]
    async fn blank_participant_is_rejected_with_field_path() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let mut form = filled_form(&svc, w.id, 1).await;
        form.participants[0].name = "   ".into();
        match svc.create(form).await {
            Err(ServiceError::Invalid(fields)) => assert!(fields.contains("participants[0].name")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_trx_id_conflicts() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let first = filled_form(&svc, w.id, 1).await;
        let mut second = filled_form(&svc, w.id, 1).await;
        second.booking_trx_id = first.booking_trx_id.clone();
        svc.create(first).await.unwrap();
        assert!(matches!(svc.create(second).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn trashed_workshop_cannot_be_booked() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Closed", dec!(100)).await;
        let svc = service(&store);
        let form = filled_form(&svc, w.id, 1).await;
        store.soft_delete_workshops(&[w.id]).await.unwrap();
        match svc.create(form).await {
            Err(ServiceError::Invalid(fields)) => assert!(fields.contains("workshop_id")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn edit_form_reprices_from_current_workshop_price() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let created = svc.create(filled_form(&svc, w.id, 3).await).await.unwrap();
        fixtures::set_workshop_price(&store, w.id, dec!(200)).await;

        let form = svc.edit_form(created.booking.id).await.unwrap();
        assert_eq!(form.price, dec!(200));
        assert_eq!(form.total_amount, dec!(666.00));
        assert_eq!(form.participants.len(), 3);

        let updated = svc.update(created.booking.id, form).await.unwrap();
        assert_eq!(updated.booking.total_amount, dec!(666.00));
        assert_eq!(updated.booking.booking_trx_id, created.booking.booking_trx_id);
    }

    #[tokio::test]
    async fn bulk_delete_trashes_exactly_selected() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(svc.create(filled_form(&svc, w.id, 1).await).await.unwrap().booking.id);
        }
        let n = svc.bulk_delete(&[ids[0], ids[2]]).await.unwrap();
        assert_eq!(n, 2);

        let live = svc.list(BookingFilter::default(), Pagination::default()).await.unwrap();
        let mut live_ids: Vec<_> = live.items.iter().map(|r| r.id).collect();
        live_ids.sort();
        let mut expected = vec![ids[1], ids[3]];
        expected.sort();
        assert_eq!(live_ids, expected);

        let trashed = BookingFilter { trashed: Trashed::Only, ..Default::default() };
        assert_eq!(svc.list(trashed, Pagination::default()).await.unwrap().total, 2);
        assert_eq!(svc.bulk_delete(&[ids[0]]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_searches_name_and_trx_id() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let mut form = filled_form(&svc, w.id, 1).await;
        form.name = "Siti Rahma".into();
        let trx = form.booking_trx_id.clone();
        svc.create(form).await.unwrap();
        svc.create(filled_form(&svc, w.id, 1).await).await.unwrap();

        let by_name = BookingFilter { search: Some("rahma".into()), ..Default::default() };
        assert_eq!(svc.list(by_name, Pagination::default()).await.unwrap().total, 1);
        let by_trx = BookingFilter { search: Some(trx.to_lowercase()), ..Default::default() };
        let rows = svc.list(by_trx, Pagination::default()).await.unwrap();
        assert_eq!(rows.items[0].workshop_name.as_deref(), Some("Pottery"));
    }

    #[tokio::test]
    async fn restore_and_force_delete() {
        let store = Arc::new(InMemoryStore::default());
        let w = fixtures::workshop(&store, "Pottery", dec!(100)).await;
        let svc = service(&store);
        let id = svc.create(filled_form(&svc, w.id, 1).await).await.unwrap().booking.id;
        svc.delete(id).await.unwrap();
        assert!(matches!(svc.delete(id).await, Err(ServiceError::NotFound(_))));
        svc.restore(id).await.unwrap();
        svc.force_delete(id).await.unwrap();
        assert!(matches!(svc.get(id).await, Err(ServiceError::NotFound(_))));
    }
}
