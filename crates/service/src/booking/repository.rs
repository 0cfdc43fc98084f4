use async_trait::async_trait;
use uuid::Uuid;

use models::{booking_transaction, workshop_participant};

use super::domain::{BookingFilter, BookingRow};
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::trashed::Trashed;

/// Persistence for bookings and their participant rosters.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Newest first.
    async fn list_bookings(&self, filter: &BookingFilter, page: Pagination) -> Result<Page<BookingRow>, ServiceError>;
    async fn find_booking(&self, id: Uuid, trashed: Trashed) -> Result<Option<booking_transaction::Model>, ServiceError>;
    /// Looks at trashed rows too; the id stays reserved until force-deleted.
    async fn find_booking_by_trx_id(&self, trx_id: &str) -> Result<Option<booking_transaction::Model>, ServiceError>;
    async fn list_participants_for_booking(&self, booking_id: Uuid) -> Result<Vec<workshop_participant::Model>, ServiceError>;
    async fn create_booking(
        &self,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError>;
    async fn update_booking(
        &self,
        id: Uuid,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError>;
    /// Soft-delete exactly `ids`; returns how many live rows were trashed.
    async fn soft_delete_bookings(&self, ids: &[Uuid]) -> Result<u64, ServiceError>;
    async fn restore_booking(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn force_delete_booking(&self, id: Uuid) -> Result<bool, ServiceError>;
}
